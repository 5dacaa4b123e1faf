use crate::{error::SvplotError, utils::util::Result};

/// The structural variant kinds that survive validation.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub enum SvKind {
    INVERSION,
    TRANSLOCATION,
    INVERTED_TRANSLOCATION,
    DUPLICATION,
    INVERTED_DUPLICATION,
}

impl SvKind {
    /// Every kind, in legend order.
    pub const ALL: [SvKind; 5] = [
        SvKind::INVERSION,
        SvKind::TRANSLOCATION,
        SvKind::INVERTED_TRANSLOCATION,
        SvKind::DUPLICATION,
        SvKind::INVERTED_DUPLICATION,
    ];

    pub fn from_u8(bytes: &[u8]) -> Result<Self> {
        match bytes {
            b"INV" => Ok(SvKind::INVERSION),
            b"TRANS" => Ok(SvKind::TRANSLOCATION),
            b"INVTR" => Ok(SvKind::INVERTED_TRANSLOCATION),
            b"DUP" => Ok(SvKind::DUPLICATION),
            b"INVDP" => Ok(SvKind::INVERTED_DUPLICATION),
            _ => Err(SvplotError::UnsupportedSvType {
                value: String::from_utf8_lossy(bytes).into_owned(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SvKind::INVERSION => "INV",
            SvKind::TRANSLOCATION => "TRANS",
            SvKind::INVERTED_TRANSLOCATION => "INVTR",
            SvKind::DUPLICATION => "DUP",
            SvKind::INVERTED_DUPLICATION => "INVDP",
        }
    }

    /// Position of the kind in [`SvKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::str::FromStr for SvKind {
    type Err = SvplotError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_u8(s.as_bytes())
    }
}

impl std::fmt::Display for SvKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_kinds() {
        assert_eq!("INV".parse::<SvKind>().unwrap(), SvKind::INVERSION);
        assert_eq!("TRANS".parse::<SvKind>().unwrap(), SvKind::TRANSLOCATION);
        assert_eq!(
            "INVTR".parse::<SvKind>().unwrap(),
            SvKind::INVERTED_TRANSLOCATION
        );
        assert_eq!("DUP".parse::<SvKind>().unwrap(), SvKind::DUPLICATION);
        assert_eq!(
            "INVDP".parse::<SvKind>().unwrap(),
            SvKind::INVERTED_DUPLICATION
        );
    }

    #[test]
    fn test_parse_rejects_other_kinds() {
        for value in ["DEL", "INS", "SYN", "inv", "INV ", ""] {
            let err = value.parse::<SvKind>().unwrap_err();
            assert!(matches!(err, SvplotError::UnsupportedSvType { .. }));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for kind in SvKind::ALL {
            assert_eq!(kind.to_string().parse::<SvKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, kind) in SvKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
