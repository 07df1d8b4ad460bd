//! Placeholder text.
//!
//! Text is built sentence by sentence: each sentence takes a random length
//! between [`MIN_SENTENCE_WORDS`] and [`MAX_SENTENCE_WORDS`] (clamped to the
//! words still owed), reads that many consecutive words from a random offset in
//! the corpus, wrapping at the end, and gets a capital letter and a terminator.

use rand::Rng;

pub const MIN_SENTENCE_WORDS: usize = 5;
pub const MAX_SENTENCE_WORDS: usize = 30;

static CORPUS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet,", "consectetur", "adipisicing", "elit.", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    "aliqua.", "ut", "enim", "ad", "minim", "veniam,", "quis", "nostrud", "exercitation",
    "ullamco", "laboris", "nisi", "ut", "aliquip", "ex", "ea", "commodo", "consequat.",
    "duis", "aute", "irure", "dolor", "in", "reprehenderit", "in", "voluptate", "velit",
    "esse", "cillum", "dolore", "eu", "fugiat", "nulla", "pariatur.", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident,", "sunt", "in", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum.", "sed", "ut", "perspiciatis",
    "unde", "omnis", "iste", "natus", "error", "sit", "voluptatem", "accusantium",
    "doloremque", "laudantium,", "totam", "rem", "aperiam,", "eaque", "ipsa", "quae", "ab",
    "illo", "inventore", "veritatis", "et", "quasi", "architecto", "beatae", "vitae",
    "dicta", "sunt", "explicabo.", "nemo", "enim", "ipsam", "voluptatem", "quia",
    "voluptas", "sit", "aspernatur", "aut", "odit", "aut", "fugit,", "sed", "quia",
    "consequuntur", "magni", "dolores", "eos", "qui", "ratione", "voluptatem", "sequi",
    "nesciunt.", "neque", "porro", "quisquam", "est,", "qui", "dolorem", "ipsum", "quia",
    "dolor", "sit", "amet,", "consectetur,", "adipisci", "velit,", "sed", "quia", "non",
    "numquam", "eius", "modi", "tempora", "incidunt", "ut", "labore", "et", "dolore",
    "magnam", "aliquam", "quaerat", "voluptatem.", "ut", "enim", "ad", "minima", "veniam,",
    "quis", "nostrum", "exercitationem", "ullam", "corporis", "suscipit", "laboriosam,",
    "nisi", "ut", "aliquid", "ex", "ea", "commodi", "consequatur?", "quis", "autem", "vel",
    "eum", "iure", "reprehenderit", "qui", "in", "ea", "voluptate", "velit", "esse", "quam",
    "nihil", "molestiae", "consequatur,", "vel", "illum", "qui", "dolorem", "eum", "fugiat",
    "quo", "voluptas", "nulla", "pariatur?",
];

/// `word_count` words of placeholder text; empty for zero.
pub fn generate<R: Rng + ?Sized>(word_count: usize, rng: &mut R) -> String {
    let mut sentences = Vec::new();
    let mut remaining = word_count;
    while remaining > 0 {
        let length = rng
            .gen_range(MIN_SENTENCE_WORDS..=MAX_SENTENCE_WORDS)
            .min(remaining);
        sentences.push(sentence(length, rng));
        remaining -= length;
    }
    sentences.join(" ")
}

fn sentence<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    let start = rng.gen_range(0..CORPUS.len());
    let mut words = words_from(start, length);
    if let Some(first) = words.first_mut() {
        *first = capitalize(first);
    }
    if let Some(last) = words.last_mut() {
        while last.ends_with([',', '.', '?', '!']) {
            last.pop();
        }
        last.push(terminator(rng.gen_range(0..4)));
    }
    words.join(" ")
}

/// `length` consecutive corpus words from `start`, wrapping at the end.
fn words_from(start: usize, length: usize) -> Vec<String> {
    (0..length)
        .map(|i| CORPUS[(start + i) % CORPUS.len()].to_string())
        .collect()
}

/// Periods are twice as likely as either other mark.
fn terminator(draw: u32) -> char {
    match draw {
        0 => '!',
        1 => '?',
        _ => '.',
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[test]
    fn zero_words_is_empty() {
        assert_eq!(generate(0, &mut StdRng::seed_from_u64(1)), "");
    }

    #[test]
    fn same_seed_same_text() {
        let a = generate(40, &mut StdRng::seed_from_u64(9));
        let b = generate(40, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn short_request_is_a_single_sentence() {
        let text = generate(3, &mut StdRng::seed_from_u64(3));
        assert_eq!(text.split(' ').count(), 3);
        assert!(text.chars().next().unwrap().is_uppercase());
        assert!(text.ends_with(['.', '?', '!']));
    }

    #[rstest]
    #[case(0, '!')]
    #[case(1, '?')]
    #[case(2, '.')]
    #[case(3, '.')]
    fn each_draw_picks_its_terminator(#[case] draw: u32, #[case] expected: char) {
        assert_eq!(terminator(draw), expected);
    }

    #[test]
    fn words_wrap_around_the_corpus_end() {
        let n = CORPUS.len();
        let words = words_from(n - 2, 5);
        let expected: Vec<String> = [CORPUS[n - 2], CORPUS[n - 1], CORPUS[0], CORPUS[1], CORPUS[2]]
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn sentence_ends_with_exactly_one_mark() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let text = sentence(MAX_SENTENCE_WORDS, &mut rng);
            let last = text.split(' ').last().unwrap();
            let marks = last.chars().filter(|c| matches!(c, ',' | '.' | '?' | '!')).count();
            assert_eq!(marks, 1, "{text}");
            assert!(text.chars().next().unwrap().is_uppercase());
        }
    }

    proptest! {
        #[test]
        fn word_count_is_exact(count in 0usize..200, seed in any::<u64>()) {
            let text = generate(count, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(text.split_whitespace().count(), count);
        }
    }
}
