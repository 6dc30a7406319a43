//! Code encoding/decoding.
//!
//! Implements the version 1 layout described in [`crate::limits`].

use crate::codec::checksum::checksum;
use crate::codec::primitives::{Reader, Writer};
use crate::error::{ChecksumMismatch, DecodeError, EncodeError};
use crate::limits::{
    CATEGORY_ID_OFFSET, CHECKSUM_OFFSET, CODE_LEN, DIRECTION_OFFSET, ENTITY_BIT, EXTERN_L1_OFFSET,
    EXTERN_L2_OFFSET, GROUP_FALSE_BIT, GROUP_TRUE_BIT, MAGIC, MAX_CATEGORY_ID, MAX_PROPERTY_ID,
    MAX_RELATION_PROPERTY_ID, PREFIX_LEN, PROPERTY_FALSE_BIT, PROPERTY_ID_OFFSET,
    PROPERTY_TRUE_BIT, RELATION_BIT, RELATION_ID_OFFSET, RELATION_PROPERTY_ID_OFFSET,
    RELATION_PROPERTY_MASK, TERM_FALSE_BIT, TERM_TRUE_BIT, TYPE_CODE_OFFSET,
};
use crate::model::{CategoryType, DecodedCode, Direction};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Enable strict decoding.
    ///
    /// When enabled:
    /// - The magic prefix must be exactly `"10"`
    /// - A checksum mismatch fails with [`DecodeError::ChecksumMismatch`]
    ///
    /// The default (lenient) mode only requires the prefix to be hex and
    /// reports checksum mismatches as warnings.
    pub strict: bool,
}

impl DecodeOptions {
    /// Creates default (lenient) decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates strict decoding options.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded fields.
    pub code: DecodedCode,
    /// Set when the trailing digit disagrees with the computed checksum.
    pub checksum_mismatch: Option<ChecksumMismatch>,
}

impl Decoded {
    /// Returns true if the code carried the expected checksum digit.
    pub fn is_checksum_valid(&self) -> bool {
        self.checksum_mismatch.is_none()
    }

    pub fn into_code(self) -> DecodedCode {
        self.code
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a code string leniently.
///
/// Fatal problems (length, digits, contradictory bits) return an error; a
/// checksum mismatch is logged and reported in [`Decoded::checksum_mismatch`].
pub fn decode_code(code: &str) -> Result<Decoded, DecodeError> {
    decode_code_with_options(code, DecodeOptions::default())
}

/// Decodes a code string with the given options.
pub fn decode_code_with_options(code: &str, options: DecodeOptions) -> Result<Decoded, DecodeError> {
    let len = code.chars().count();
    if len != CODE_LEN {
        return Err(DecodeError::InvalidLength { len });
    }

    let reader = Reader::new(code);

    if options.strict && reader.slice(0, TYPE_CODE_OFFSET) != MAGIC {
        tracing::debug!(code, "rejecting code with foreign magic prefix");
        return Err(DecodeError::InvalidMagic {
            found: reader.slice(0, TYPE_CODE_OFFSET),
        });
    }

    let type_code = reader.read_hex_byte(TYPE_CODE_OFFSET, "type_code")?;
    let is_property = decode_flag(type_code, PROPERTY_TRUE_BIT, PROPERTY_FALSE_BIT, "is_property")?;
    let is_group = decode_flag(type_code, GROUP_TRUE_BIT, GROUP_FALSE_BIT, "is_group")?;
    let is_term = decode_flag(type_code, TERM_TRUE_BIT, TERM_FALSE_BIT, "is_term")?;
    let category_type = decode_category(type_code)?;

    let category_id = reader.read_decimal_byte(CATEGORY_ID_OFFSET, "category_id")?;
    let relation_id = reader.read_hex_byte(RELATION_ID_OFFSET, "relation_id")?;

    let (direction, property_id) = if category_type == CategoryType::Relation {
        let digit = reader.read_char(DIRECTION_OFFSET, "direction")?;
        let direction = Direction::from_digit(digit)
            .ok_or(DecodeError::UnknownDirectionDigit { found: digit })?;
        let property_id = reader.read_hex_byte(RELATION_PROPERTY_ID_OFFSET, "property_id")?
            & RELATION_PROPERTY_MASK;
        (direction, u16::from(property_id))
    } else {
        let property_id = reader.read_hex(PROPERTY_ID_OFFSET, 3, "property_id")?;
        (Direction::Unknown, property_id)
    };

    let extern_l1_id = reader.read_hex_byte(EXTERN_L1_OFFSET, "extern_l1_id")?;
    let extern_l2_id = reader.read_hex_byte(EXTERN_L2_OFFSET, "extern_l2_id")?;

    let decoded = DecodedCode {
        category_type,
        is_property,
        is_group,
        is_term,
        category_id,
        relation_id,
        direction,
        property_id,
        extern_l1_id,
        extern_l2_id,
    };

    let checksum_mismatch = verify_checksum(&reader, code)?;
    if let Some(mismatch) = &checksum_mismatch {
        if options.strict {
            tracing::debug!(code, "rejecting code with checksum mismatch");
            return Err(DecodeError::ChecksumMismatch(mismatch.clone()));
        }
        tracing::warn!(
            code,
            expected = %mismatch.expected,
            found = %mismatch.found,
            "code checksum mismatch"
        );
    }

    Ok(Decoded {
        code: decoded,
        checksum_mismatch,
    })
}

/// Reads one tri-state flag from its true/false bit pair.
fn decode_flag(
    type_code: u8,
    true_bit: u8,
    false_bit: u8,
    flag: &'static str,
) -> Result<Option<bool>, DecodeError> {
    match (type_code & true_bit != 0, type_code & false_bit != 0) {
        (true, true) => Err(DecodeError::InvalidFlag { flag, type_code }),
        (true, false) => Ok(Some(true)),
        (false, true) => Ok(Some(false)),
        (false, false) => Ok(None),
    }
}

fn decode_category(type_code: u8) -> Result<CategoryType, DecodeError> {
    match (type_code & RELATION_BIT != 0, type_code & ENTITY_BIT != 0) {
        (true, true) => Err(DecodeError::ConflictingCategory { type_code }),
        (true, false) => Ok(CategoryType::Relation),
        (false, true) => Ok(CategoryType::Entity),
        (false, false) => Ok(CategoryType::Unknown),
    }
}

fn verify_checksum(reader: &Reader, code: &str) -> Result<Option<ChecksumMismatch>, DecodeError> {
    let expected = checksum(&reader.slice(0, PREFIX_LEN))?;
    let found = reader.read_char(CHECKSUM_OFFSET, "checksum")?;
    if found == expected {
        Ok(None)
    } else {
        Ok(Some(ChecksumMismatch {
            code: code.to_string(),
            expected,
            found,
        }))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a code into its canonical 16-character string.
///
/// Fails only when a field does not fit its slot in the layout.
pub fn encode_code(code: &DecodedCode) -> Result<String, EncodeError> {
    validate_code(code)?;

    let mut writer = Writer::with_capacity(CODE_LEN);
    writer.write_str(MAGIC);

    let type_code = (code.category_type.bits() << 6)
        | (encode_flag(code.is_property) << 4)
        | (encode_flag(code.is_group) << 2)
        | encode_flag(code.is_term);
    writer.write_hex(u16::from(type_code), 2);

    writer.write_decimal(code.category_id);
    writer.write_hex(u16::from(code.relation_id), 2);

    if code.category_type == CategoryType::Relation {
        writer.write_digit(code.direction.digit());
        writer.write_hex(code.property_id, 2);
    } else {
        writer.write_hex(code.property_id, 3);
    }

    writer.write_hex(u16::from(code.extern_l1_id), 2);
    writer.write_hex(u16::from(code.extern_l2_id), 2);

    Ok(writer.finish())
}

fn encode_flag(flag: Option<bool>) -> u8 {
    match flag {
        None => 0b00,
        Some(true) => 0b10,
        Some(false) => 0b01,
    }
}

fn validate_code(code: &DecodedCode) -> Result<(), EncodeError> {
    if code.category_id > MAX_CATEGORY_ID {
        return Err(EncodeError::ValueOutOfRange {
            field: "category_id",
            value: u32::from(code.category_id),
            max: u32::from(MAX_CATEGORY_ID),
        });
    }

    let max_property_id = if code.category_type == CategoryType::Relation {
        MAX_RELATION_PROPERTY_ID
    } else {
        if code.direction != Direction::Unknown {
            return Err(EncodeError::DirectionOnNonRelation {
                direction: code.direction,
            });
        }
        MAX_PROPERTY_ID
    };
    if code.property_id > max_property_id {
        return Err(EncodeError::ValueOutOfRange {
            field: "property_id",
            value: u32::from(code.property_id),
            max: u32::from(max_property_id),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::CodeBuilder;

    const FLAG_STATES: [Option<bool>; 3] = [None, Some(true), Some(false)];

    /// Replaces the checksum digit of `prefix` so the code is self-consistent.
    fn with_checksum(prefix: &str) -> String {
        format!("{}{}", prefix, checksum(prefix).unwrap())
    }

    #[test]
    fn test_decode_entity_example() {
        let decoded = decode_code("1041000000000006").unwrap();
        let code = decoded.code;

        assert_eq!(code.category_type, CategoryType::Entity);
        assert_eq!(code.is_property, None);
        assert_eq!(code.is_group, None);
        assert_eq!(code.is_term, Some(false));
        assert_eq!(code.category_id, 0);
        assert_eq!(code.relation_id, 0);
        assert_eq!(code.direction, Direction::Unknown);
        assert_eq!(code.property_id, 0);
        assert_eq!(code.extern_l1_id, 0);
        assert_eq!(code.extern_l2_id, 0);

        // The trailing digit is stale; the canonical digit is '9'.
        let mismatch = decoded.checksum_mismatch.unwrap();
        assert_eq!(mismatch.expected, '9');
        assert_eq!(mismatch.found, '6');
        assert_eq!(encode_code(&code).unwrap(), "1041000000000009");
    }

    #[test]
    fn test_decode_relation() {
        let decoded = decode_code("1098122a13fab011").unwrap();
        assert!(decoded.is_checksum_valid());

        let code = decoded.into_code();
        assert_eq!(code.category_type, CategoryType::Relation);
        assert_eq!(code.is_property, Some(false));
        assert_eq!(code.is_group, Some(true));
        assert_eq!(code.is_term, None);
        assert_eq!(code.category_id, 12);
        assert_eq!(code.relation_id, 0x2a);
        assert_eq!(code.direction, Direction::Forward);
        assert_eq!(code.property_id, 0x3f);
        assert_eq!(code.extern_l1_id, 0xab);
        assert_eq!(code.extern_l2_id, 0x01);
        assert_eq!(code.from_entity_id(), Some(1));
        assert_eq!(code.to_entity_id(), Some(2));
    }

    #[test]
    fn test_decode_masks_relation_property_id() {
        // 0xff in the relation property slot keeps only its low six bits.
        let code = with_checksum("108000001ff0000");
        let decoded = decode_code(&code).unwrap().code;
        assert_eq!(decoded.property_id, 0x3f);
    }

    #[test]
    fn test_decode_entity_uses_three_property_digits() {
        let code = with_checksum("10400000fff0000");
        let decoded = decode_code(&code).unwrap();
        assert!(decoded.is_checksum_valid());
        assert_eq!(decoded.code.property_id, 0xfff);
        assert_eq!(decoded.code.direction, Direction::Unknown);
    }

    #[test]
    fn test_encode_fixtures() {
        let cases = [
            (
                CodeBuilder::entity(0).term(false).build(),
                "1041000000000009",
            ),
            (
                CodeBuilder::entity(1).property(true).property_id(0x12).build(),
                "1060010001200005",
            ),
            (
                CodeBuilder::entity(99)
                    .flags(Some(true), Some(false), Some(true))
                    .relation_id(0xff)
                    .property_id(0xfff)
                    .externs(0xff, 0xff)
                    .build(),
                "106699fffffffff1",
            ),
            (DecodedCode::default(), "1000000000000009"),
        ];

        for (code, expected) in cases {
            let encoded = encode_code(&code).unwrap();
            assert_eq!(encoded, expected);
            assert_eq!(decode_code(&encoded).unwrap().code, code);
        }
    }

    #[test]
    fn test_category_id_is_decimal() {
        let code = CodeBuilder::entity(42).build();
        let encoded = encode_code(&code).unwrap();
        assert_eq!(&encoded[4..6], "42");
    }

    #[test]
    fn test_wrong_length() {
        let result = decode_code("104100000000000");
        assert!(matches!(result, Err(DecodeError::InvalidLength { len: 15 })));

        let result = decode_code("10410000000000000");
        assert!(matches!(result, Err(DecodeError::InvalidLength { len: 17 })));

        let result = decode_code("");
        assert!(matches!(result, Err(DecodeError::InvalidLength { len: 0 })));
    }

    #[test]
    fn test_length_counts_characters() {
        // 15 chars, 16 bytes
        let result = decode_code("1041000000000é0");
        assert!(matches!(result, Err(DecodeError::InvalidLength { len: 15 })));
    }

    #[test]
    fn test_non_ascii_field_digit() {
        let result = decode_code("10410000000é0000");
        assert!(matches!(
            result,
            Err(DecodeError::InvalidDigit {
                field: "extern_l1_id",
                position: 11,
                found: 'é'
            })
        ));

        let result = decode_code("1é41000000000009");
        assert!(matches!(
            result,
            Err(DecodeError::InvalidDigit { position: 1, found: 'é', .. })
        ));
    }

    #[test]
    fn test_non_ascii_checksum_digit_is_a_warning() {
        let decoded = decode_code("104100000000000é").unwrap();
        assert_eq!(decoded.code, decode_code("1041000000000009").unwrap().code);

        let mismatch = decoded.checksum_mismatch.unwrap();
        assert_eq!(mismatch.expected, '9');
        assert_eq!(mismatch.found, 'é');
    }

    #[test]
    fn test_conflicting_category() {
        let result = decode_code("10c0000000000008");
        assert!(matches!(
            result,
            Err(DecodeError::ConflictingCategory { type_code: 0b1100_0000 })
        ));
    }

    #[test]
    fn test_invalid_flags() {
        let result = decode_code("103000000000000c");
        assert!(matches!(
            result,
            Err(DecodeError::InvalidFlag {
                flag: "is_property",
                type_code: 0b0011_0000
            })
        ));

        let result = decode_code(&with_checksum("100c00000000000"));
        assert!(matches!(
            result,
            Err(DecodeError::InvalidFlag { flag: "is_group", .. })
        ));

        let result = decode_code(&with_checksum("100300000000000"));
        assert!(matches!(
            result,
            Err(DecodeError::InvalidFlag { flag: "is_term", .. })
        ));
    }

    #[test]
    fn test_unknown_direction_digit() {
        let result = decode_code(&with_checksum("108000004000000"));
        assert!(matches!(
            result,
            Err(DecodeError::UnknownDirectionDigit { found: '4' })
        ));
    }

    #[test]
    fn test_direction_digit_ignored_for_entities() {
        let decoded = decode_code(&with_checksum("104000004000000")).unwrap();
        assert_eq!(decoded.code.direction, Direction::Unknown);
        assert_eq!(decoded.code.property_id, 0x400);
    }

    #[test]
    fn test_invalid_digits() {
        let result = decode_code("10400a0000000000");
        assert!(matches!(
            result,
            Err(DecodeError::InvalidDigit {
                field: "category_id",
                position: 5,
                ..
            })
        ));

        let result = decode_code("10400000000z0000");
        assert!(matches!(
            result,
            Err(DecodeError::InvalidDigit {
                field: "extern_l1_id",
                position: 11,
                found: 'z'
            })
        ));
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let decoded = decode_code("1098122A13FAB011").unwrap();
        assert!(decoded.is_checksum_valid());
        assert_eq!(decoded.code.extern_l1_id, 0xab);
    }

    #[test]
    fn test_checksum_mismatch_is_a_warning() {
        let good = "1098122a13fab011";
        let corrupted = "1098122a13fab015";

        let clean = decode_code(good).unwrap();
        let dirty = decode_code(corrupted).unwrap();

        assert!(clean.is_checksum_valid());
        assert!(!dirty.is_checksum_valid());
        assert_eq!(clean.code, dirty.code);

        let mismatch = dirty.checksum_mismatch.unwrap();
        assert_eq!(mismatch.code, corrupted);
        assert_eq!(mismatch.expected, '1');
        assert_eq!(mismatch.found, '5');
    }

    #[test]
    fn test_non_hex_checksum_digit_is_a_warning() {
        let decoded = decode_code("104100000000000x").unwrap();
        assert_eq!(decoded.checksum_mismatch.unwrap().found, 'x');
    }

    #[test]
    fn test_lenient_mode_ignores_magic() {
        let code = with_checksum("204100000000000");
        assert!(decode_code(&code).is_ok());
    }

    #[test]
    fn test_strict_mode() {
        let result = decode_code_with_options("1041000000000006", DecodeOptions::strict());
        match result {
            Err(err @ DecodeError::ChecksumMismatch(_)) => {
                assert_eq!(err.code(), crate::error::ErrorCode::ChecksumMismatch);
            }
            other => panic!("expected checksum mismatch, got {:?}", other),
        }

        let code = with_checksum("204100000000000");
        let result = decode_code_with_options(&code, DecodeOptions::strict());
        assert!(matches!(result, Err(DecodeError::InvalidMagic { found }) if found == "20"));

        let result = decode_code_with_options("1041000000000009", DecodeOptions::strict());
        assert!(result.unwrap().is_checksum_valid());
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        let code = CodeBuilder::entity(100).build();
        assert!(matches!(
            encode_code(&code),
            Err(EncodeError::ValueOutOfRange { field: "category_id", value: 100, max: 99 })
        ));

        let code = CodeBuilder::entity(1).property_id(0x1000).build();
        assert!(matches!(
            encode_code(&code),
            Err(EncodeError::ValueOutOfRange { field: "property_id", max: 0xfff, .. })
        ));

        let code = CodeBuilder::relation_category(12).property_id(0x40).build();
        assert!(matches!(
            encode_code(&code),
            Err(EncodeError::ValueOutOfRange { field: "property_id", max: 0x3f, .. })
        ));
    }

    #[test]
    fn test_encode_rejects_direction_on_entity() {
        let code = CodeBuilder::entity(1).direction(Direction::Forward).build();
        assert!(matches!(
            encode_code(&code),
            Err(EncodeError::DirectionOnNonRelation { direction: Direction::Forward })
        ));
    }

    #[test]
    fn test_flag_pairs_roundtrip() {
        for a in FLAG_STATES {
            for b in FLAG_STATES {
                for c in FLAG_STATES {
                    let code = CodeBuilder::entity(3).flags(a, b, c).build();
                    let decoded = decode_code(&encode_code(&code).unwrap()).unwrap();
                    assert!(decoded.is_checksum_valid());
                    assert_eq!(decoded.code.is_property, a);
                    assert_eq!(decoded.code.is_group, b);
                    assert_eq!(decoded.code.is_term, c);
                }
            }
        }
    }

    fn flag() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Unknown),
            Just(Direction::Forward),
            Just(Direction::Backward),
            Just(Direction::BiDirection),
        ]
    }

    prop_compose! {
        fn relation_code()(
            flags in (flag(), flag(), flag()),
            category_id in 0u8..=99,
            relation_id in any::<u8>(),
            direction in direction(),
            property_id in 0u16..=0x3f,
            externs in (any::<u8>(), any::<u8>()),
        ) -> DecodedCode {
            DecodedCode {
                category_type: CategoryType::Relation,
                is_property: flags.0,
                is_group: flags.1,
                is_term: flags.2,
                category_id,
                relation_id,
                direction,
                property_id,
                extern_l1_id: externs.0,
                extern_l2_id: externs.1,
            }
        }
    }

    prop_compose! {
        fn non_relation_code()(
            entity in any::<bool>(),
            flags in (flag(), flag(), flag()),
            category_id in 0u8..=99,
            relation_id in any::<u8>(),
            property_id in 0u16..=0xfff,
            externs in (any::<u8>(), any::<u8>()),
        ) -> DecodedCode {
            DecodedCode {
                category_type: if entity { CategoryType::Entity } else { CategoryType::Unknown },
                is_property: flags.0,
                is_group: flags.1,
                is_term: flags.2,
                category_id,
                relation_id,
                direction: Direction::Unknown,
                property_id,
                extern_l1_id: externs.0,
                extern_l2_id: externs.1,
            }
        }
    }

    fn any_code() -> impl Strategy<Value = DecodedCode> {
        prop_oneof![relation_code(), non_relation_code()]
    }

    proptest! {
        #[test]
        fn prop_roundtrip(code in any_code()) {
            let encoded = encode_code(&code).unwrap();
            prop_assert_eq!(encoded.len(), CODE_LEN);
            prop_assert!(encoded.starts_with(MAGIC));

            let decoded = decode_code(&encoded).unwrap();
            prop_assert!(decoded.is_checksum_valid());
            prop_assert_eq!(decoded.code, code);
        }

        #[test]
        fn prop_checksum_is_shared(code in any_code()) {
            let encoded = encode_code(&code).unwrap();
            let expected = checksum(&encoded[..PREFIX_LEN]).unwrap();
            prop_assert_eq!(encoded.chars().last(), Some(expected));
        }

        #[test]
        fn prop_corrupted_checksum_keeps_fields(code in any_code(), digit in 0u32..16) {
            let encoded = encode_code(&code).unwrap();
            let replacement = char::from_digit(digit, 16).unwrap();
            let corrupted = format!("{}{}", &encoded[..PREFIX_LEN], replacement);

            let decoded = decode_code(&corrupted).unwrap();
            prop_assert_eq!(decoded.code, code);
            prop_assert_eq!(decoded.is_checksum_valid(), corrupted == encoded);
        }
    }
}
