use crate::utils::error::{ApiTestError, Result};
use bytes::Bytes;
use percent_encoding::percent_decode_str;
use reqwest::header::CONTENT_TYPE;
use reqwest::{tls, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub const JSON_MIME: &str = "application/json";
pub const ZIP_MIME: &str = "application/zip";

/// HTTP transport bound to one PMM Server base URL.
///
/// Credentials are taken from the URL's user info and sent as basic auth on
/// every request. Responses are decoded by media type before the status code
/// is looked at: anything that isn't JSON (or zip, for byte-stream calls) is
/// an nginx error page.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: Url,
    auth: Option<(String, String)>,
}

impl Transport {
    pub fn new(base_url: &Url, insecure_tls: bool) -> Result<Self> {
        let mut builder = Client::builder().http1_only();

        if base_url.scheme() == "https" {
            builder = builder
                .use_rustls_tls()
                .min_tls_version(tls::Version::TLS_1_2)
                .danger_accept_invalid_certs(insecure_tls);
        }

        let client = builder.build()?;

        let auth = match base_url.username() {
            "" => None,
            user => Some((
                decode_userinfo("username", user)?,
                decode_userinfo("password", base_url.password().unwrap_or_default())?,
            )),
        };

        let mut url = base_url.clone();
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url: url,
            auth,
        })
    }

    /// Same server and credentials under another base path.
    pub fn with_base_path(&self, base_path: &str) -> Self {
        let mut url = self.base_url.clone();
        let path = format!("/{}/", base_path.trim_matches('/'));
        url.set_path(if path == "//" { "/" } else { path.as_str() });

        Self {
            client: self.client.clone(),
            base_url: url,
            auth: self.auth.clone(),
        }
    }

    /// Base URL without credentials; the path always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<R: DeserializeOwned>(&self, operation: &str, path: &str) -> Result<R> {
        let request = self.request(Method::GET, path)?;
        let (status, media_type, body) = self.execute(operation, request).await?;
        decode_json(operation, status, &media_type, body)
    }

    pub async fn post<B, R>(&self, operation: &str, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        let (status, media_type, body) = self.execute(operation, request).await?;
        decode_json(operation, status, &media_type, body)
    }

    /// GET for endpoints that return an archive instead of JSON.
    pub async fn get_bytes(&self, operation: &str, path: &str) -> Result<Bytes> {
        let request = self.request(Method::GET, path)?;
        let (status, media_type, body) = self.execute(operation, request).await?;

        match media_type.as_str() {
            ZIP_MIME | JSON_MIME if status.is_success() => Ok(body),
            JSON_MIME => Err(api_error(operation, status, &body)),
            ZIP_MIME => Err(ApiTestError::ApiError {
                operation: operation.to_string(),
                code: status.as_u16(),
                payload: serde_json::Value::Null,
            }),
            _ => Err(nginx_error(&body)),
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, JSON_MIME);
        if let Some((user, password)) = &self.auth {
            request = request.basic_auth(user, Some(password));
        }
        Ok(request)
    }

    async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<(StatusCode, String, Bytes)> {
        let request = request.build()?;
        tracing::debug!(
            component = "client",
            operation,
            "{} {}",
            request.method(),
            request.url()
        );

        let response = self.client.execute(request).await?;
        let status = response.status();
        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(parse_media_type)
            .unwrap_or_default();
        let body = response.bytes().await?;

        tracing::debug!(
            component = "client",
            operation,
            status = status.as_u16(),
            content_type = %media_type,
            "{}",
            if media_type == ZIP_MIME {
                format!("<{} bytes>", body.len())
            } else {
                String::from_utf8_lossy(&body).into_owned()
            }
        );

        Ok((status, media_type, body))
    }
}

/// URL user info is kept percent-encoded by `url`; basic auth needs the raw text.
fn decode_userinfo(field: &str, encoded: &str) -> Result<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ApiTestError::InvalidConfigValueError {
            field: format!("server_url {}", field),
            value: encoded.to_string(),
            reason: format!("Invalid percent-encoding: {}", e),
        })
}

/// `text/html; charset=utf-8` -> `text/html`
fn parse_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn decode_json<R: DeserializeOwned>(
    operation: &str,
    status: StatusCode,
    media_type: &str,
    body: Bytes,
) -> Result<R> {
    if media_type != JSON_MIME {
        return Err(nginx_error(&body));
    }
    if !status.is_success() {
        return Err(api_error(operation, status, &body));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("{}")?);
    }
    Ok(serde_json::from_slice(&body)?)
}

fn api_error(operation: &str, status: StatusCode, body: &[u8]) -> ApiTestError {
    let payload = serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()));
    ApiTestError::ApiError {
        operation: operation.to_string(),
        code: status.as_u16(),
        payload,
    }
}

fn nginx_error(body: &[u8]) -> ApiTestError {
    ApiTestError::FromNginx(String::from_utf8_lossy(body).into_owned())
}
