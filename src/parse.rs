use byteorder::{ByteOrder, LittleEndian};

use crate::error::SourceQueryError;

/// Find the null terminator of the string starting at `offset`.
///
/// Returns the index of the terminator, or a protocol error if the buffer
/// ends first.
fn find_terminator(data: &[u8], offset: usize) -> Result<usize, SourceQueryError> {
    let rest = data
        .get(offset..)
        .ok_or_else(|| SourceQueryError::protocol("truncated packet: string past end of buffer"))?;

    rest.iter()
        .position(|c| *c == 0)
        .map(|len| offset + len)
        .ok_or_else(|| SourceQueryError::protocol("truncated packet: unterminated string"))
}

/// Get the value of a null-terminated string
/// with index 0 at `offset` in an array of bytes.
///
/// Mutates `offset` to the index after the null-termination byte.
/// `offset` is left untouched on error. Invalid UTF-8 is replaced with U+FFFD.
pub fn get_string(data: &[u8], offset: &mut usize) -> Result<String, SourceQueryError> {
    let end = find_terminator(data, *offset)?;
    let value = String::from_utf8_lossy(&data[*offset..end]).into_owned();
    *offset = end + 1;

    Ok(value)
}

/// Skip over a null-terminated string without decoding it.
pub fn skip_string(data: &[u8], offset: &mut usize) -> Result<(), SourceQueryError> {
    *offset = find_terminator(data, *offset)? + 1;
    Ok(())
}

/// Get the [u8] at index `offset` from `data`.
///
/// Mutates `offset` to the index after the byte.
pub fn get_u8(data: &[u8], offset: &mut usize) -> Result<u8, SourceQueryError> {
    let byte = *data
        .get(*offset)
        .ok_or_else(|| SourceQueryError::protocol("truncated packet: missing byte"))?;
    *offset += 1;
    Ok(byte)
}

/// Get 2 little-endian bytes (as a [u16]) at index `offset` from `data`.
///
/// Mutates `offset` to the index after the bytes.
pub fn get_u16(data: &[u8], offset: &mut usize) -> Result<u16, SourceQueryError> {
    let bytes = data
        .get(*offset..*offset + 2)
        .ok_or_else(|| SourceQueryError::protocol("truncated packet: missing short"))?;
    *offset += 2;
    Ok(LittleEndian::read_u16(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_advances_past_terminator() {
        let data = b"abc\0de\0";
        let mut offset = 0;
        assert_eq!(get_string(data, &mut offset).unwrap(), "abc");
        assert_eq!(offset, 4);
        assert_eq!(get_string(data, &mut offset).unwrap(), "de");
        assert_eq!(offset, data.len());
    }

    #[test]
    fn empty_string() {
        let mut offset = 0;
        assert_eq!(get_string(b"\0", &mut offset).unwrap(), "");
        assert_eq!(offset, 1);
    }

    #[test]
    fn unterminated_string_is_protocol_error() {
        let mut offset = 0;
        let err = get_string(b"no terminator", &mut offset).unwrap_err();
        assert!(matches!(err, SourceQueryError::Protocol(_)));
        assert_eq!(offset, 0);
    }

    #[test]
    fn string_offset_past_end() {
        let mut offset = 10;
        assert!(skip_string(b"ab\0", &mut offset).is_err());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut offset = 0;
        let name = get_string(b"Caf\xE9 DayZ\0", &mut offset).unwrap();
        assert_eq!(name, "Caf\u{FFFD} DayZ");
        assert_eq!(offset, 10);
    }

    #[test]
    fn skip_does_not_decode() {
        let mut offset = 0;
        skip_string(&[0xFF, 0xFE, 0x00, 0x07], &mut offset).unwrap();
        assert_eq!(get_u8(&[0xFF, 0xFE, 0x00, 0x07], &mut offset).unwrap(), 7);
    }

    #[test]
    fn integers_are_bounds_checked() {
        let data = [0x02, 0x01];
        let mut offset = 0;
        assert_eq!(get_u16(&data, &mut offset).unwrap(), 0x0102);
        assert!(get_u8(&data, &mut offset).is_err());

        let mut offset = 1;
        assert!(get_u16(&data, &mut offset).is_err());
        assert_eq!(offset, 1);
    }
}
