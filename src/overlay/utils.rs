/// NUL-terminated UTF-16 for Win32 string parameters.
pub fn to_wstring(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_terminator() {
        assert_eq!(to_wstring("ab"), vec![0x61, 0x62, 0]);
        assert_eq!(to_wstring(""), vec![0]);
    }
}
