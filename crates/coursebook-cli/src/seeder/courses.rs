use coursebook_models::CourseDraft;
use fake::Fake;
use fake::faker::lorem::en::{Sentence, Words};

const SUBJECTS: &[&str] = &[
    "MATH", "CS", "PHYS", "CHEM", "BIO", "HIST", "ENGL", "ECON", "PHIL", "ART",
];

/// Generates valid course drafts: numbers 100-499, credits 1-5.
pub fn generate_courses(count: usize) -> Vec<CourseDraft> {
    (0..count)
        .map(|_| {
            let subject = SUBJECTS[(0..SUBJECTS.len()).fake::<usize>()];
            let words: Vec<String> = Words(2..4).fake();

            CourseDraft {
                name: title_case(&words),
                subject: subject.to_string(),
                number: (100..500).fake::<i32>(),
                description: Some(Sentence(6..12).fake()),
                credits: (1..=5).fake::<i32>(),
            }
        })
        .collect()
}

fn title_case(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
