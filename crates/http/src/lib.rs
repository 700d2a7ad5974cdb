use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Raw response as seen by the transport. Non-2xx statuses are not errors at
/// this layer: backends put their error message in the body and callers need
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpResponse, Error>> + Send;

    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<HttpResponse, Error>> + Send;
}
