use std::time::Duration;

use hypr_http::HttpResponse;

/// [`hypr_http::HttpClient`] over a shared `reqwest::Client`, rooted at the
/// backend's base URL.
///
/// Timeouts live here: the ingest client treats a timed-out request like any
/// other transport failure.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    api_base: url::Url,
}

impl ReqwestHttpClient {
    pub fn new(api_base: url::Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_base })
    }

    pub fn api_base(&self) -> &url::Url {
        &self.api_base
    }

    /// Resolve a backend-relative path (API route or media location).
    pub fn resolve(&self, path: &str) -> Result<url::Url, hypr_http::Error> {
        make_url(&self.api_base, path)
    }
}

impl hypr_http::HttpClient for ReqwestHttpClient {
    async fn get(&self, path: &str) -> Result<HttpResponse, hypr_http::Error> {
        let url = make_url(&self.api_base, path)?;
        let response = self.client.get(url).send().await?;
        into_response(response).await
    }

    async fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<HttpResponse, hypr_http::Error> {
        let url = make_url(&self.api_base, path)?;
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        into_response(response).await
    }
}

async fn into_response(response: reqwest::Response) -> Result<HttpResponse, hypr_http::Error> {
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    Ok(HttpResponse {
        status,
        body: body.to_vec(),
    })
}

fn make_url(base: &url::Url, path: &str) -> Result<url::Url, hypr_http::Error> {
    let mut url = base.clone();

    let (path_part, query_part) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };

    url.path_segments_mut()
        .map_err(|_| "base URL cannot carry a path")?
        .pop_if_empty()
        .extend(path_part.split('/').filter(|s| !s.is_empty()));

    url.set_query(query_part);
    Ok(url)
}
