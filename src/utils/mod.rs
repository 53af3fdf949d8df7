pub mod ip;

/// 生成 `<stem>-<millis><.ext>` 形式的存储文件名
///
/// Anything outside `[A-Za-z0-9._-]` in the stem becomes `_` so the result is
/// always a single path component.
pub fn stored_file_name(original: &str, millis: i64) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let (stem, ext) = match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    };

    let clean = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    };

    let stem = clean(stem).trim_start_matches('.').to_string();
    let stem = if stem.is_empty() { "file".to_string() } else { stem };
    format!("{}-{}{}", stem, millis, clean(ext))
}

/// 单段文件名校验（拒绝路径穿越）
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.starts_with('.')
}
