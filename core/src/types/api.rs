//! Wire types shared with the dashboard's REST backend.
//!
//! Every endpoint wraps its payload in [`ApiResponse`]; list endpoints put a
//! [`Paginated`] page inside it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    pub status: String,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            message: self.message,
            status: self.status,
        }
    }
}

/// One page of a list endpoint. `next`/`prev` are page numbers when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit as u64)
    }
}

/// Drops absent and blank parameters, keeping the order of the rest.
pub fn clean_query<'a, I>(params: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value?;
            if value.trim().is_empty() {
                return None;
            }
            Some((key.to_string(), value))
        })
        .collect()
}
