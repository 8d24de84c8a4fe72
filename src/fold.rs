use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip accents from a string by NFD decomposition followed by removal of
/// combining marks. `"café"` folds to `"cafe"` regardless of whether the
/// input was composed or decomposed.
#[must_use]
pub fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Accent-fold a string while keeping a byte-offset map back to the original.
///
/// `map` has `folded.len() + 1` entries: `map[i]` is the byte offset in the
/// original string that produced folded byte `i`, and `map[folded.len()]`
/// equals `s.len()`. A combining mark contributes no folded bytes, so a match
/// boundary placed after its base character consumes the mark as well.
#[must_use]
pub fn fold_accents_with_map(s: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(s.len());
    let mut map = Vec::with_capacity(s.len() + 1);

    for (offset, ch) in s.char_indices() {
        for decomposed in ch.nfd().filter(|c| !is_combining_mark(*c)) {
            let before = folded.len();
            folded.push(decomposed);
            for _ in before..folded.len() {
                map.push(offset);
            }
        }
    }
    map.push(s.len());

    (folded, map)
}
