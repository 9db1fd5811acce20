use ::bytesize::ByteSize;
use ::mime::Mime;
use ::std::fmt::Display;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;

use crate::CapturedResponse;

/// An arbituary limit to avoid printing gigabytes into failure messages.
const MAX_TEXT_PRINT_LEN: usize = 10_000;

/// Displays a captured body for failure messages,
/// based on its content type.
#[derive(Debug)]
pub struct DebugResponseBody<'a>(pub &'a CapturedResponse);

impl Display for DebugResponseBody<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let maybe_mime = self
            .0
            .maybe_content_type()
            .and_then(|content_type| content_type.parse::<Mime>().ok());

        let Some(mime) = maybe_mime else {
            // We just default to text
            return write_text(f, &self.0.text());
        };

        let type_ = mime.type_();
        let subtype = mime.subtype();

        if subtype == mime::JSON || mime.suffix() == Some(mime::JSON) {
            write_json(f, self.0)
        } else if type_ == mime::TEXT || subtype == mime::WWW_FORM_URLENCODED {
            write_text(f, &self.0.text())
        } else if type_ == mime::APPLICATION && subtype == mime::OCTET_STREAM {
            let len = self.0.as_bytes().len();
            write!(f, "<Bytes, with len {}>", ByteSize(len as u64))
        } else {
            let len = self.0.as_bytes().len();
            write!(
                f,
                "<Unknown content type '{}', with len {}>",
                mime.essence_str(),
                ByteSize(len as u64)
            )
        }
    }
}

fn write_text(f: &mut Formatter<'_>, text: &str) -> FmtResult {
    if text.chars().count() <= MAX_TEXT_PRINT_LEN {
        return write!(f, "'{text}'");
    }

    write!(f, "'")?;
    for c in text.chars().take(MAX_TEXT_PRINT_LEN) {
        write!(f, "{c}")?;
    }
    write!(f, "...'")
}

fn write_json(f: &mut Formatter<'_>, response: &CapturedResponse) -> FmtResult {
    let bytes = response.as_bytes();
    let maybe_pretty_raw = ::serde_json::from_slice::<::serde_json::Value>(bytes)
        .and_then(|body| ::serde_json::to_string_pretty(&body));

    match maybe_pretty_raw {
        Ok(pretty_raw) => write!(f, "{pretty_raw}"),
        Err(_) => write!(
            f,
            "!!! YOUR JSON IS MALFORMED !!!\nBody: '{}'",
            response.text()
        ),
    }
}

#[cfg(test)]
mod test_fmt {
    use super::*;
    use crate::ResponseRecorder;
    use ::pretty_assertions::assert_eq;

    fn new_response(maybe_content_type: Option<&str>, body: &[u8]) -> CapturedResponse {
        let mut recorder = ResponseRecorder::new();
        if let Some(content_type) = maybe_content_type {
            recorder.insert_header("content-type", content_type).unwrap();
        }
        recorder.write_bytes(body);

        recorder.finish()
    }

    #[test]
    fn it_should_display_text_response_as_text() {
        let response = new_response(Some("text/plain; charset=utf-8"), b"Blah blah");

        let output = format!("{}", DebugResponseBody(&response));

        assert_eq!(output, "'Blah blah'");
    }

    #[test]
    fn it_should_display_untyped_response_as_text() {
        let response = new_response(None, b"name=value1");

        let output = format!("{}", DebugResponseBody(&response));

        assert_eq!(output, "'name=value1'");
    }

    #[test]
    fn it_should_cutoff_very_long_text() {
        let max_len = MAX_TEXT_PRINT_LEN + 100;
        let body = (0..max_len).map(|_| "🦊").collect::<String>();
        let response = new_response(None, body.as_bytes());

        let output = format!("{}", DebugResponseBody(&response));

        let expected_content = (0..MAX_TEXT_PRINT_LEN).map(|_| "🦊").collect::<String>();
        assert_eq!(output, format!("'{expected_content}...'"));
    }

    #[test]
    fn it_should_pretty_print_json() {
        let response = new_response(
            Some("application/json; charset=utf-8"),
            br#"{"name":"Joe","age":20}"#,
        );

        let output = format!("{}", DebugResponseBody(&response));
        let expected = r###"{
  "age": 20,
  "name": "Joe"
}"###;

        assert_eq!(output, expected);
    }

    #[test]
    fn it_should_warn_malformed_json() {
        let response = new_response(Some("application/json"), br#"{ "name": "Joe" "#);

        let output = format!("{}", DebugResponseBody(&response));
        let expected = r###"!!! YOUR JSON IS MALFORMED !!!
Body: '{ "name": "Joe" '"###;

        assert_eq!(output, expected);
    }

    #[test]
    fn it_should_summarise_byte_streams() {
        let response = new_response(Some("application/octet-stream"), &[0; 12]);

        let output = format!("{}", DebugResponseBody(&response));

        assert_eq!(output, format!("<Bytes, with len {}>", ByteSize(12)));
    }
}
