//! Identifier minting, timestamps and entropy helpers

use bech32::Bech32m;
use chrono::{DateTime, TimeZone, Utc};
use uuid7::uuid7;

// mint a fresh account address: uuid7 encoded with bech32 under the given hrp
pub fn new_uuid_to_bech32(hrp: &str) -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(hrp)?;
    let encode = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(encode)
}

/// Draw a roll in `0..100` from the random tail of a fresh uuid7.
///
/// The crate carries no dedicated RNG; uuid7's trailing random bits are
/// plenty for pack-opening rolls.
pub fn random_percent() -> u8 {
    let id = uuid7();
    let bytes = id.as_bytes();
    (u16::from_be_bytes([bytes[14], bytes[15]]) % 100) as u8
}

/// Pick an index in `0..len`. `len` must be non-zero.
pub fn random_index(len: usize) -> usize {
    let id = uuid7();
    let bytes = id.as_bytes();
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[8..16]);
    (u64::from_be_bytes(word) % len as u64) as usize
}

/// Wall-clock stamp carried on persisted records.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct TimeStamp<T: TimeZone>(DateTime<T>);

impl TimeStamp<Utc> {
    pub fn now() -> Self {
        Self(Utc::now())
    }
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<T: TimeZone> From<DateTime<T>> for TimeStamp<T> {
    fn from(value: DateTime<T>) -> Self {
        TimeStamp(value)
    }
}

impl<C> minicbor::Encode<C> for TimeStamp<Utc> {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        if let Some(nsec) = self.0.timestamp_nanos_opt() {
            return e.i64(nsec)?.ok();
        }

        Err(minicbor::encode::Error::message(
            "failed to encode timestamp. timestamp_nanos_opt returned None",
        ))
    }
}

impl<'b, C> minicbor::Decode<'b, C> for TimeStamp<Utc> {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let nsecs = d.i64()?;

        Ok(TimeStamp(DateTime::from_timestamp_nanos(nsecs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_encoding() {
        let original = TimeStamp::now();

        let encoding = minicbor::to_vec(original.clone()).unwrap();
        let decode: TimeStamp<Utc> = minicbor::decode(&encoding).unwrap();

        assert_eq!(original, decode);
    }

    #[test]
    fn rolls_stay_in_range() {
        for _ in 0..256 {
            assert!(random_percent() < 100);
            assert!(random_index(7) < 7);
        }
    }
}
