use bytes::Bytes;
use headers::ContentType;
use serde::Serialize;

use crate::client::ClientError;

/// The body of an HTTP request with its content type.
#[derive(Clone, derive_more::Debug)]
pub struct CallBody {
    pub(in crate::client) content_type: ContentType,
    #[debug(ignore)]
    pub(in crate::client) data: Bytes,
}

impl CallBody {
    /// Creates a JSON body from a serializable type.
    ///
    /// This method serializes the data as `application/json` using the `serde_json` crate.
    ///
    /// ```rust
    /// # use tyrest_core::CallBody;
    /// # use serde::Serialize;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// #[derive(Serialize)]
    /// struct CreateMessage {
    ///     content: String,
    /// }
    ///
    /// let body = CallBody::json(&CreateMessage { content: "hello".to_string() })?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be serialized.
    pub fn json<T>(value: &T) -> Result<Self, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(value)?;
        Ok(Self {
            content_type: ContentType::json(),
            data: Bytes::from(data),
        })
    }

    /// Creates a form-encoded body from a serializable type.
    ///
    /// This method serializes the data as `application/x-www-form-urlencoded`
    /// using the `serde_urlencoded` crate.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be form-encoded.
    pub fn form<T>(value: &T) -> Result<Self, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_urlencoded::to_string(value).map_err(|err| {
            ClientError::SerializationError {
                message: format!("Failed to serialize form data: {err}"),
            }
        })?;
        Ok(Self {
            content_type: ContentType::form_url_encoded(),
            data: Bytes::from(data),
        })
    }

    /// Creates a `text/plain` body.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::text_utf8(),
            data: Bytes::from(text.into()),
        }
    }

    /// Creates a raw body with a custom content type.
    ///
    /// ```rust
    /// use tyrest_core::CallBody;
    /// use headers::ContentType;
    ///
    /// let body = CallBody::raw(vec![0x89, 0x50, 0x4E, 0x47], ContentType::png());
    /// ```
    pub fn raw(data: impl Into<Bytes>, content_type: ContentType) -> Self {
        Self {
            content_type,
            data: data.into(),
        }
    }

    /// The content type sent with the body.
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// The encoded body.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize)]
    struct Message {
        content: String,
        tts: bool,
    }

    #[test]
    fn should_encode_json_body() {
        let message = Message {
            content: "hello".to_string(),
            tts: false,
        };

        let body = CallBody::json(&message).expect("should encode");

        assert_eq!(body.content_type(), &ContentType::json());
        insta::assert_snapshot!(String::from_utf8_lossy(body.data()), @r#"{"content":"hello","tts":false}"#);
    }

    #[test]
    fn should_encode_form_body() {
        let body = CallBody::form(&[("grant_type", "client_credentials"), ("scope", "identify")])
            .expect("should encode");

        assert_eq!(body.content_type(), &ContentType::form_url_encoded());
        assert_eq!(body.data(), b"grant_type=client_credentials&scope=identify");
    }

    #[test]
    fn should_reject_non_form_values() {
        let result = CallBody::form(&42);

        assert!(matches!(result, Err(ClientError::SerializationError { .. })));
    }

    #[test]
    fn should_build_text_body() {
        let body = CallBody::text("plain");

        assert_eq!(body.content_type().to_string(), "text/plain; charset=utf-8");
        assert_eq!(body.data(), b"plain");
    }

    #[test]
    fn should_not_debug_data() {
        let body = CallBody::text("secret");

        let debug = format!("{body:?}");

        assert!(!debug.contains("secret"));
    }
}
