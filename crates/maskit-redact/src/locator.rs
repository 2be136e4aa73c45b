/// Find the character index of every occurrence of `keyword` in `text`,
/// ignoring case.
///
/// After a hit the scan resumes at the end of the match, so an occurrence that
/// starts inside a previous one is never reported: `"aa"` in `"aaa"` yields
/// only `[0]`.
pub fn locate(keyword: &str, text: &str) -> Vec<usize> {
    let needle: Vec<char> = keyword.chars().collect();
    let haystack: Vec<char> = text.chars().collect();
    let mut indexes = Vec::new();

    if needle.is_empty() {
        return indexes;
    }

    let mut start = 0;
    while start < haystack.len() {
        match find_from(&haystack, &needle, start) {
            Some(index) => {
                indexes.push(index);
                start = index + needle.len();
            }
            None => break,
        }
    }

    indexes
}

/// Case-insensitive substring test. An empty keyword is contained everywhere.
pub fn contains_ignore_case(text: &str, keyword: &str) -> bool {
    let needle: Vec<char> = keyword.chars().collect();
    let haystack: Vec<char> = text.chars().collect();
    needle.is_empty() || find_from(&haystack, &needle, 0).is_some()
}

fn find_from(haystack: &[char], needle: &[char], start: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (start..=haystack.len() - needle.len()).find(|&i| {
        haystack[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&a, &b)| chars_eq(a, b))
    })
}

fn chars_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
