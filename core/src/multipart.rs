//! Minimal `multipart/form-data` writer for text fields.
//!
//! Produces the same framing as a standard form encoder: each part starts with
//! a boundary delimiter, carries a `Content-Disposition` header naming the
//! field, and the body ends with the closing `--boundary--` marker.

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::consts::MULTIPART_FORM_DATA;

/// Accumulates text fields into a multipart body.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    buf: BytesMut,
    parts: usize,
}

impl MultipartForm {
    /// Start a form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: BytesMut::new(),
            parts: 0,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `Content-Type` value announcing this form's boundary.
    pub fn content_type(&self) -> String {
        format!("{MULTIPART_FORM_DATA}; boundary={}", self.boundary)
    }

    pub fn write_field(&mut self, name: &str, value: &str) {
        if self.parts > 0 {
            self.buf.put_slice(b"\r\n");
        }
        self.buf.put_slice(b"--");
        self.buf.put_slice(self.boundary.as_bytes());
        self.buf.put_slice(b"\r\n");
        self.buf.put_slice(b"Content-Disposition: form-data; name=\"");
        self.buf.put_slice(escape_quotes(name).as_bytes());
        self.buf.put_slice(b"\"\r\n\r\n");
        self.buf.put_slice(value.as_bytes());
        self.parts += 1;
    }

    /// Append the closing delimiter and return the encoded body.
    pub fn finish(mut self) -> Bytes {
        if self.parts > 0 {
            self.buf.put_slice(b"\r\n");
        }
        self.buf.put_slice(b"--");
        self.buf.put_slice(self.boundary.as_bytes());
        self.buf.put_slice(b"--\r\n");
        self.buf.freeze()
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_layout() {
        let mut form = MultipartForm::with_boundary("xyz");
        form.write_field("a", "1");
        let body = form.finish();
        assert_eq!(
            &body[..],
            b"--xyz\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\r\n--xyz--\r\n"
        );
    }

    #[test]
    fn later_parts_are_separated_by_crlf_delimiter() {
        let mut form = MultipartForm::with_boundary("b");
        form.write_field("a", "1");
        form.write_field("b", "2");
        let body = String::from_utf8(form.finish().to_vec()).unwrap();
        assert_eq!(
            body,
            "--b\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\
             \r\n--b\r\nContent-Disposition: form-data; name=\"b\"\r\n\r\n2\
             \r\n--b--\r\n"
        );
    }

    #[test]
    fn empty_form_is_just_the_close_marker() {
        let body = MultipartForm::with_boundary("b").finish();
        assert_eq!(&body[..], b"--b--\r\n");
    }

    #[test]
    fn field_names_are_escaped() {
        let mut form = MultipartForm::with_boundary("b");
        form.write_field(r#"we"ird\name"#, "v");
        let body = String::from_utf8(form.finish().to_vec()).unwrap();
        assert!(body.contains(r#"name="we\"ird\\name""#));
    }

    #[test]
    fn random_boundaries_differ() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert_ne!(a.boundary(), b.boundary());
        assert_eq!(a.boundary().len(), 32);
        assert_eq!(
            a.content_type(),
            format!("multipart/form-data; boundary={}", a.boundary())
        );
    }
}
