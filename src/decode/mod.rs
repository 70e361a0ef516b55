use crate::constants::{MAX_CREATOR_LEN, METADATA_V1_KEY, MIN_METADATA_LEN};
use crate::data::{Collection, Creator, Metadata, TokenStandard};

pub mod errors;
pub mod reader;

pub use errors::DecodeError;
use reader::AccountReader;

/// Decodes a `MetadataV1` account. Either the whole record decodes or an
/// error is returned.
pub fn decode_metadata(data: &[u8]) -> Result<Metadata, DecodeError> {
    if data.len() < MIN_METADATA_LEN {
        return Err(DecodeError::TooShort {
            len: data.len(),
            min: MIN_METADATA_LEN,
        });
    }

    let mut reader = AccountReader::new(data);

    let key = reader.read_u8("key")?;
    if key != METADATA_V1_KEY {
        return Err(DecodeError::UnsupportedVersion {
            found: key,
            expected: METADATA_V1_KEY,
        });
    }

    let update_authority = reader.read_pubkey("update_authority")?;
    let mint = reader.read_pubkey("mint")?;
    let name = reader.read_string("name")?;
    let symbol = reader.read_string("symbol")?;
    let uri = reader.read_string("uri")?;
    let seller_fee_basis_points = reader.read_i16("seller_fee_basis_points")?;
    let creators = decode_creators(&mut reader)?;
    let primary_sale_happened = reader.read_bool("primary_sale_happened")?;
    let is_mutable = reader.read_bool("is_mutable")?;

    // Fields appended by later program versions. Old accounts simply end here.
    let edition_nonce =
        decode_option(&mut reader, "edition_nonce", |r| r.read_u8("edition_nonce"))?;
    let token_standard =
        decode_option(&mut reader, "token_standard", |r| r.read_u8("token_standard"))?
            .and_then(TokenStandard::from_discriminator);
    let collection = decode_option(&mut reader, "collection", |r| {
        Ok(Collection {
            verified: r.read_bool("collection.verified")?,
            key: r.read_pubkey("collection.key")?,
        })
    })?;

    Ok(Metadata {
        key,
        update_authority,
        mint,
        name,
        symbol,
        uri,
        seller_fee_basis_points,
        creators,
        primary_sale_happened,
        is_mutable,
        edition_nonce,
        token_standard,
        collection,
    })
}

fn decode_creators(reader: &mut AccountReader) -> Result<Option<Vec<Creator>>, DecodeError> {
    if !reader.read_bool("has_creators")? {
        return Ok(None);
    }

    let count = reader.read_u32("creators.len")? as usize;
    // The count is untrusted; never reserve more than the data could hold.
    let mut creators = Vec::with_capacity(count.min(reader.remaining() / MAX_CREATOR_LEN));

    for _ in 0..count {
        creators.push(Creator {
            address: reader.read_pubkey("creator.address")?,
            verified: reader.read_bool("creator.verified")?,
            share: reader.read_u8("creator.share")?,
        });
    }

    Ok(Some(creators))
}

/// A trailing optional field: absent when the data ends, otherwise a one byte
/// tag and, if set, the value.
fn decode_option<T, F>(
    reader: &mut AccountReader,
    field: &'static str,
    read: F,
) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(&mut AccountReader) -> Result<T, DecodeError>,
{
    if reader.is_empty() || !reader.read_bool(field)? {
        return Ok(None);
    }
    read(reader).map(Some)
}
