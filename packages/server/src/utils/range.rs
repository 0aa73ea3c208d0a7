/// Inclusive byte range resolved against a known body size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse a `Range` header value against a body of `size` bytes.
///
/// Handles the single-range forms "bytes=0-499", "bytes=500-" and
/// "bytes=-500". Returns `None` for anything unparseable or unsatisfiable;
/// the caller then serves the full body with a 200 instead of a 416.
pub fn parse_range_header(value: &str, size: u64) -> Option<ByteRange> {
    if size == 0 {
        return None;
    }
    let spec = value.strip_prefix("bytes=")?;
    // Multipart ranges are not supported.
    if spec.contains(',') {
        return None;
    }
    let (start_str, end_str) = spec.split_once('-')?;

    let start = if start_str.is_empty() {
        // Suffix form: the last N bytes.
        let suffix_len = end_str.parse::<u64>().ok()?;
        size.saturating_sub(suffix_len)
    } else {
        start_str.parse::<u64>().ok()?
    };

    let end = if start_str.is_empty() || end_str.is_empty() {
        size - 1
    } else {
        Ord::min(end_str.parse::<u64>().ok()?, size - 1)
    };

    if start <= end && start < size {
        Some(ByteRange { start, end })
    } else {
        None
    }
}
