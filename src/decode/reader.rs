use solana_program::pubkey::Pubkey;

use super::errors::DecodeError;
use crate::constants::PUBKEY_LENGTH;

/// Forward-only reader over untrusted account data. Every read goes through
/// `take`, which checks the remaining length first.
pub struct AccountReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> AccountReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let end = match self.cursor.checked_add(n) {
            Some(end) if end <= self.data.len() => end,
            _ => {
                return Err(DecodeError::OutOfBounds {
                    field,
                    offset: self.cursor,
                    needed: n,
                    remaining: self.remaining(),
                })
            }
        };

        let bytes = &self.data[self.cursor..end];
        self.cursor = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N, field)?);
        Ok(buf)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, field)?[0])
    }

    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        Ok(self.read_u8(field)? != 0)
    }

    pub fn read_i16(&mut self, field: &'static str) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.take_array(field)?))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take_array(field)?))
    }

    pub fn read_pubkey(&mut self, field: &'static str) -> Result<Pubkey, DecodeError> {
        Ok(Pubkey::new_from_array(self.take_array::<PUBKEY_LENGTH>(field)?))
    }

    /// u32 length prefix followed by that many bytes. Invalid UTF-8 is
    /// replaced and trailing NUL padding is dropped.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u32(field)? as usize;
        let bytes = self.take(len, field)?;

        Ok(String::from_utf8_lossy(bytes)
            .trim_end_matches(char::from(0))
            .to_string())
    }
}
