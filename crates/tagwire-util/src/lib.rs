pub mod result_ext;

/// Upper case hex without separators, the format tag identifiers are shown in
pub fn hex_upper(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_id_hex() {
        assert_eq!(hex_upper([0x04, 0xa2, 0x1f]), "04A21F");
        assert_eq!(hex_upper(Vec::<u8>::new()), "");
    }
}
