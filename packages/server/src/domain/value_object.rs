//! Value objects
//!
//! ハンドシェイクで受け取る文字列をドメインの型に変換します。
//! 変換に成功した値は常に書式制約を満たします。

use std::{fmt, str::FromStr};

use super::error::ValueObjectError;

/// Room key: exactly 5 lowercase ASCII letters (`^[a-z]{5}$`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey(String);

impl RoomKey {
    /// Required key length
    pub const LEN: usize = 5;

    /// Create a new RoomKey, validating its format
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_lowercase()) {
            Ok(Self(value))
        } else {
            Err(ValueObjectError::InvalidRoomKey(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomKey {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for RoomKey {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant id: unsigned 32-bit integer supplied by the client
///
/// Uniqueness is not enforced: two sessions may carry the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(u32);

impl ParticipantId {
    /// Longest accepted decimal representation (`4294967295`)
    pub const MAX_DIGITS: usize = 10;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for ParticipantId {
    type Err = ValueObjectError;

    /// Parse a plain decimal id.
    ///
    /// Signs, whitespace and more than ten digits are rejected before the
    /// range check so that `+1`, `-0` or ` 7` never slip through.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueObjectError::InvalidParticipantId(s.to_string());

        if s.is_empty() || s.len() > Self::MAX_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        s.parse::<u64>()
            .ok()
            .and_then(|value| u32::try_from(value).ok())
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl From<u32> for ParticipantId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_key_accepts_five_lowercase_letters() {
        // テスト項目: 小文字 5 文字のキーは受け付けられる
        // given (前提条件):
        let candidates = ["abcde", "zzzzz", "hello"];

        // when (操作):
        let keys: Vec<_> = candidates
            .iter()
            .map(|s| RoomKey::new(s.to_string()))
            .collect();

        // then (期待する結果):
        for (key, expected) in keys.into_iter().zip(candidates) {
            assert_eq!(key.unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_room_key_rejects_invalid_formats() {
        // テスト項目: 書式に合わないキーは拒否される
        // given (前提条件):
        let candidates = ["ABCDE", "abcd", "abcdef", "abcd1", "", "abcdé", "ab de", "aBcde"];

        for candidate in candidates {
            // when (操作):
            let result = RoomKey::new(candidate.to_string());

            // then (期待する結果):
            assert_eq!(
                result,
                Err(ValueObjectError::InvalidRoomKey(candidate.to_string())),
                "'{}' should be rejected",
                candidate
            );
        }
    }

    #[test]
    fn test_participant_id_accepts_full_range() {
        // テスト項目: 0 から 4294967295 までの ID は受け付けられる
        // given (前提条件):
        let candidates = [("0", 0u32), ("42", 42), ("0042", 42), ("4294967295", u32::MAX)];

        for (input, expected) in candidates {
            // when (操作):
            let result = input.parse::<ParticipantId>();

            // then (期待する結果):
            assert_eq!(result, Ok(ParticipantId::new(expected)));
        }
    }

    #[test]
    fn test_participant_id_rejects_out_of_range_and_malformed() {
        // テスト項目: 範囲外・不正な書式の ID は拒否される
        // given (前提条件):
        let candidates = [
            "4294967296",
            "99999999999",
            "-1",
            "+1",
            "",
            " 7",
            "7 ",
            "1.5",
            "abc",
            "00000000001",
        ];

        for candidate in candidates {
            // when (操作):
            let result = candidate.parse::<ParticipantId>();

            // then (期待する結果):
            assert!(result.is_err(), "'{}' should be rejected", candidate);
        }
    }
}
