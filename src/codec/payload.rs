//! Text-safe payload unwrapping.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::util::{SlideMatchError, SlideMatchResult};

const DELIMITER: char = ',';

/// Returns everything after the first `,` of a `"<metadata>,<payload>"` string.
pub fn strip_metadata(text: &str) -> SlideMatchResult<&str> {
    text.split_once(DELIMITER)
        .map(|(_, payload)| payload)
        .ok_or(SlideMatchError::MalformedPayload {
            reason: "missing ',' between metadata and payload",
        })
}

/// Strips the metadata prefix and base64-decodes the payload.
///
/// ASCII whitespace (line wrapping) inside the payload is ignored.
pub fn decode_payload(text: &str) -> SlideMatchResult<Vec<u8>> {
    let payload = strip_metadata(text)?;
    if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: Vec<u8> = payload
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        return Ok(STANDARD.decode(compact)?);
    }
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::{decode_payload, strip_metadata};
    use crate::util::{ErrorKind, SlideMatchError};

    #[test]
    fn strips_up_to_first_comma() {
        assert_eq!(strip_metadata("data:image/png;base64,QUJD").unwrap(), "QUJD");
        assert_eq!(strip_metadata(",a,b").unwrap(), "a,b");
    }

    #[test]
    fn missing_delimiter_is_malformed() {
        let err = decode_payload("QUJD").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn decodes_wrapped_base64() {
        assert_eq!(decode_payload("meta,QU\r\nJD").unwrap(), b"ABC");
    }

    #[test]
    fn invalid_base64_is_encoding_error() {
        let err = decode_payload("data:image/png;base64,@@@@").unwrap_err();
        assert!(matches!(err, SlideMatchError::Encoding { .. }));
    }
}
