use stepwise_interface::RawResponse;

use crate::error::{ReqwestBackendError, Result};

pub(crate) async fn collect_response(
    mut response: reqwest::Response,
    max_response_buffer_size: Option<u64>,
) -> Result<RawResponse> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_owned(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect();

    if max_response_buffer_size
        .zip(response.content_length())
        .is_some_and(|(max, len)| len > max)
    {
        return Err(ReqwestBackendError::ResponseTooLarge);
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if max_response_buffer_size.is_some_and(|max| (body.len() + chunk.len()) as u64 > max) {
            return Err(ReqwestBackendError::ResponseTooLarge);
        }
        body.extend_from_slice(&chunk);
    }

    Ok(RawResponse {
        status,
        headers,
        body,
    })
}
