/// OVP (Optimal Viewing Position) pivot resolution
///
/// Fixation should land slightly left of a word's visual centre. The pivot
/// index is a fixed lookup on the word's length in characters:
/// - 1 char word → position 0 (1st letter)
/// - 2-5 char words → position 1 (2nd letter)
/// - 6-9 char words → position 2 (3rd letter)
/// - 10-13 char words → position 3 (4th letter)
/// - 14+ char words → floor((len - 1) * 0.35)
///
/// Returns `None` for an empty word.
pub fn calculate_anchor_position(word: &str) -> Option<usize> {
    pivot_index_for_len(word.chars().count())
}

pub fn pivot_index_for_len(len: usize) -> Option<usize> {
    match len {
        0 => None,
        1 => Some(0),
        2..=5 => Some(1),
        6..=9 => Some(2),
        10..=13 => Some(3),
        // (len - 1) * 0.35 in exact integer arithmetic
        _ => Some((len - 1) * 35 / 100),
    }
}

/// A word split around its pivot character.
///
/// `left + pivot + right` is always the original word. For a non-empty word
/// `pivot` holds exactly one character; for an empty word all parts are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PivotSplit<'a> {
    pub left: &'a str,
    pub pivot: &'a str,
    pub right: &'a str,
}

impl PivotSplit<'_> {
    pub fn is_empty(&self) -> bool {
        self.pivot.is_empty()
    }

    /// Character index of the pivot within the word.
    pub fn pivot_index(&self) -> usize {
        self.left.chars().count()
    }
}

/// Splits a word into left / pivot / right around its OVP.
///
/// Splits happen on char boundaries, so multi-byte text is safe.
pub fn resolve_pivot(word: &str) -> PivotSplit<'_> {
    let Some(index) = calculate_anchor_position(word) else {
        return PivotSplit::default();
    };

    let mut boundaries = word.char_indices().skip(index);
    let Some((start, pivot_char)) = boundaries.next() else {
        return PivotSplit::default();
    };
    let end = start + pivot_char.len_utf8();

    PivotSplit {
        left: &word[..start],
        pivot: &word[start..end],
        right: &word[end..],
    }
}
