//! Reader for the OS shared cookie storage file (`Cookies.binarycookies`).
//!
//! Apple platforms persist `HTTPCookieStorage` (and the WebKit data store)
//! in this binary format. It is the bulk store behind
//! [`BinaryCookiesStore`](crate::sources::BinaryCookiesStore): every cookie
//! for every domain, with no filtering of its own.
//!
//! ## File Format
//! 1. Header: "cook" magic + page count + page sizes (big-endian)
//! 2. Pages: each page holds cookie records addressed by little-endian offsets
//! 3. Footer: checksum (ignored)
//!
//! ## References
//! - https://github.com/libyal/dtformats/blob/main/documentation/Safari%20Cookies.asciidoc

use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use std::io::{Cursor, Read};
use std::path::Path;
use time::OffsetDateTime;

/// Magic bytes at the start of a binary cookies file.
const MAGIC: &[u8; 4] = b"cook";

/// Fixed-size portion of a cookie record, before its strings.
const RECORD_HEADER_LEN: usize = 56;

/// Seconds between the Unix epoch and Mac absolute time (2001-01-01 UTC).
const MAC_TO_UNIX: i64 = 978_307_200;

const FLAG_SECURE: u32 = 0x01;
const FLAG_HTTP_ONLY: u32 = 0x04;

/// Read and parse a binary cookies file from disk.
pub fn read_binary_cookies(path: &Path) -> Result<Vec<CanonicalCookie>, StoreError> {
    let data = std::fs::read(path).store_context(path)?;
    parse_binary_cookies(&data)
}

/// Parse the raw bytes of a `Cookies.binarycookies` file.
///
/// Cookies come back in file order, which is what keeps bulk queries stable.
pub fn parse_binary_cookies(data: &[u8]) -> Result<Vec<CanonicalCookie>, StoreError> {
    if data.len() < 8 {
        return Err(StoreError::invalid_data("File too small"));
    }

    if &data[0..4] != MAGIC {
        return Err(StoreError::invalid_data(
            "Invalid magic bytes (not a binary cookies file)",
        ));
    }

    let mut cursor = Cursor::new(data);
    cursor.set_position(4);

    let num_pages = read_u32_be(&mut cursor)?;

    let mut page_sizes = Vec::new();
    for _ in 0..num_pages {
        page_sizes.push(read_u32_be(&mut cursor)?);
    }

    let mut all_cookies = Vec::new();
    for page_size in page_sizes {
        let page_start = cursor.position() as usize;
        let page_end = page_start
            .checked_add(page_size as usize)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| StoreError::invalid_data("Page extends beyond file"))?;

        all_cookies.extend(parse_page(&data[page_start..page_end])?);
        cursor.set_position(page_end as u64);
    }

    Ok(all_cookies)
}

fn parse_page(data: &[u8]) -> Result<Vec<CanonicalCookie>, StoreError> {
    if data.len() < 8 {
        return Err(StoreError::invalid_data("Page too small"));
    }

    let mut cursor = Cursor::new(data);

    // Page header, 0x00000100.
    let _header = read_u32_be(&mut cursor)?;
    let num_cookies = read_u32_le(&mut cursor)?;

    let mut cookie_offsets = Vec::new();
    for _ in 0..num_cookies {
        cookie_offsets.push(read_u32_le(&mut cursor)?);
    }

    let mut cookies = Vec::with_capacity(cookie_offsets.len());
    for offset in cookie_offsets {
        let record = data
            .get(offset as usize..)
            .ok_or_else(|| StoreError::invalid_data("Cookie offset out of bounds"))?;
        cookies.push(parse_cookie(record)?);
    }

    Ok(cookies)
}

fn parse_cookie(data: &[u8]) -> Result<CanonicalCookie, StoreError> {
    if data.len() < RECORD_HEADER_LEN {
        return Err(StoreError::invalid_data("Cookie record too small"));
    }

    let mut cursor = Cursor::new(data);

    let _size = read_u32_le(&mut cursor)?;
    let _version = read_u32_le(&mut cursor)?;
    let flags = read_u32_le(&mut cursor)?;
    let _has_port = read_u32_le(&mut cursor)?;
    let domain_offset = read_u32_le(&mut cursor)?;
    let name_offset = read_u32_le(&mut cursor)?;
    let path_offset = read_u32_le(&mut cursor)?;
    let value_offset = read_u32_le(&mut cursor)?;
    let _comment_offset = read_u32_le(&mut cursor)?;
    let _end_header = read_u32_le(&mut cursor)?;
    let expiry_time = read_f64_le(&mut cursor)?;
    let creation_time = read_f64_le(&mut cursor)?;

    let domain = read_null_terminated_string(data, domain_offset as usize)?;
    let name = read_null_terminated_string(data, name_offset as usize)?;
    let path = read_null_terminated_string(data, path_offset as usize)?;
    let value = read_null_terminated_string(data, value_offset as usize)?;

    Ok(CanonicalCookie {
        name,
        value,
        host_only: !domain.starts_with('.'),
        domain,
        path,
        creation_time: mac_absolute_time_to_offset(creation_time)
            .unwrap_or_else(OffsetDateTime::now_utc),
        expiration_time: mac_absolute_time_to_offset(expiry_time),
        secure: flags & FLAG_SECURE != 0,
        http_only: flags & FLAG_HTTP_ONLY != 0,
    })
}

fn read_u32_be(cursor: &mut Cursor<&[u8]>) -> Result<u32, StoreError> {
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| StoreError::invalid_data("Unexpected EOF"))?;
    Ok(u32::from_be_bytes(buf))
}

fn read_u32_le(cursor: &mut Cursor<&[u8]>) -> Result<u32, StoreError> {
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| StoreError::invalid_data("Unexpected EOF"))?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f64_le(cursor: &mut Cursor<&[u8]>) -> Result<f64, StoreError> {
    let mut buf = [0u8; 8];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| StoreError::invalid_data("Unexpected EOF"))?;
    Ok(f64::from_le_bytes(buf))
}

fn read_null_terminated_string(data: &[u8], offset: usize) -> Result<String, StoreError> {
    let slice = data
        .get(offset..)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::invalid_data("String offset out of bounds"))?;

    let end = slice.iter().position(|&b| b == 0).unwrap_or(slice.len());
    String::from_utf8(slice[..end].to_vec())
        .map_err(|_| StoreError::invalid_data("Invalid UTF-8 in string"))
}

/// Mac absolute time is seconds since 2001-01-01 00:00:00 UTC.
fn mac_absolute_time_to_offset(timestamp: f64) -> Option<OffsetDateTime> {
    if !timestamp.is_finite() || timestamp <= 0.0 {
        return None;
    }

    let unix_secs = (timestamp as i64).checked_add(MAC_TO_UNIX)?;
    OffsetDateTime::from_unix_timestamp(unix_secs).ok()
}

/// Encode cookies as a single-page binary cookies file.
#[cfg(test)]
pub(crate) fn encode_binary_cookies(cookies: &[CanonicalCookie]) -> Vec<u8> {
    let mut records = Vec::new();
    for cookie in cookies {
        let mut strings = Vec::new();
        let mut offsets = Vec::new();
        for s in [&cookie.domain, &cookie.name, &cookie.path, &cookie.value] {
            offsets.push((RECORD_HEADER_LEN + strings.len()) as u32);
            strings.extend_from_slice(s.as_bytes());
            strings.push(0);
        }

        let mut flags = 0;
        if cookie.secure {
            flags |= FLAG_SECURE;
        }
        if cookie.http_only {
            flags |= FLAG_HTTP_ONLY;
        }

        let mut record = Vec::new();
        record.extend_from_slice(&((RECORD_HEADER_LEN + strings.len()) as u32).to_le_bytes());
        record.extend_from_slice(&0u32.to_le_bytes());
        record.extend_from_slice(&flags.to_le_bytes());
        record.extend_from_slice(&0u32.to_le_bytes());
        for offset in &offsets {
            record.extend_from_slice(&offset.to_le_bytes());
        }
        record.extend_from_slice(&0u32.to_le_bytes());
        record.extend_from_slice(&0u32.to_le_bytes());
        let expiry = cookie
            .expiration_time
            .map(|t| (t.unix_timestamp() - MAC_TO_UNIX) as f64)
            .unwrap_or(0.0);
        record.extend_from_slice(&expiry.to_le_bytes());
        record.extend_from_slice(&((cookie.creation_time.unix_timestamp() - MAC_TO_UNIX) as f64).to_le_bytes());
        record.extend_from_slice(&strings);
        records.push(record);
    }

    let mut page = Vec::new();
    page.extend_from_slice(&0x0000_0100u32.to_be_bytes());
    page.extend_from_slice(&(records.len() as u32).to_le_bytes());
    let mut offset = 8 + 4 * records.len() + 4;
    for record in &records {
        page.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += record.len();
    }
    page.extend_from_slice(&0u32.to_le_bytes());
    for record in &records {
        page.extend_from_slice(record);
    }

    let mut file = Vec::new();
    file.extend_from_slice(MAGIC);
    file.extend_from_slice(&1u32.to_be_bytes());
    file.extend_from_slice(&(page.len() as u32).to_be_bytes());
    file.extend_from_slice(&page);
    // Checksum footer.
    file.extend_from_slice(&[0u8; 8]);
    file
}
