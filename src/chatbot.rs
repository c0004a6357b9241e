// src/chatbot.rs

use serde::{Deserialize, Serialize};

use crate::models::student::Language;

/// Keyword entry with an answer in every supported language.
struct Entry {
    keywords: &'static [&'static str],
    en: &'static str,
    hi: &'static str,
    te: &'static str,
}

impl Entry {
    fn answer(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Hi => self.hi,
            Language::Te => self.te,
        }
    }
}

/// Searched in order; the first entry with a matching keyword answers.
const KNOWLEDGE_BASE: &[Entry] = &[
    Entry {
        keywords: &["data structure"],
        en: "A data structure is a way of organizing and storing data efficiently.",
        hi: "डेटा स्ट्रक्चर डेटा को व्यवस्थित और कुशल तरीके से संग्रहित करने की विधि है।",
        te: "డేటా స్ట్రక్చర్ అనేది డేటాను సమర్థవంతంగా నిర్వహించే విధానం.",
    },
    Entry {
        keywords: &["algorithm"],
        en: "An algorithm is a step-by-step procedure to solve a problem.",
        hi: "एल्गोरिदम किसी समस्या को हल करने की चरणबद्ध प्रक्रिया है।",
        te: "అల్గోరిథం అనేది సమస్యను పరిష్కరించే దశల సమాహారం.",
    },
    Entry {
        keywords: &["array"],
        en: "An array stores elements in contiguous memory locations.",
        hi: "ऐरे लगातार मेमोरी लोकेशन में डेटा स्टोर करता है।",
        te: "అర్రే అనేది సమీప మెమరీలో డేటాను నిల్వ చేస్తుంది.",
    },
    Entry {
        keywords: &["linked list"],
        en: "A linked list is a collection of nodes connected using pointers.",
        hi: "लिंक्ड लिस्ट नोड्स का संग्रह है जो पॉइंटर द्वारा जुड़े होते हैं।",
        te: "లింక్డ్ లిస్ట్ అనేది నోడ్‌ల సమాహారం.",
    },
    Entry {
        keywords: &["stack"],
        en: "Stack follows LIFO: Last In First Out.",
        hi: "स्टैक LIFO सिद्धांत पर काम करता है।",
        te: "స్టాక్ LIFO విధానాన్ని అనుసరిస్తుంది.",
    },
    Entry {
        keywords: &["queue"],
        en: "Queue follows FIFO: First In First Out.",
        hi: "क्यू FIFO सिद्धांत पर काम करता है।",
        te: "క్యూ FIFO విధానాన్ని అనుసరిస్తుంది.",
    },
    Entry {
        keywords: &["binary search"],
        en: "Binary search works on sorted arrays by dividing the search space.",
        hi: "बाइनरी सर्च सॉर्टेड ऐरे पर काम करता है।",
        te: "బైనరీ సెర్చ్ సార్టెడ్ అర్రేలో పనిచేస్తుంది.",
    },
    Entry {
        keywords: &["time complexity"],
        en: "Time complexity measures how execution time grows with input size.",
        hi: "टाइम कॉम्प्लेक्सिटी समय वृद्धि को दर्शाती है।",
        te: "టైమ్ కాంప్లెక్సిటీ సమయ వృద్ధిని సూచిస్తుంది.",
    },
];

const FALLBACK: Entry = Entry {
    keywords: &[],
    en: "Sorry, I can answer only Data Structures and Algorithms questions.",
    hi: "माफ़ कीजिए, मैं केवल DSA से जुड़े प्रश्नों का उत्तर दे सकता हूँ।",
    te: "క్షమించండి, నేను DSA ప్రశ్నలకు మాత్రమే సమాధానం ఇవ్వగలను.",
};

/// Answers a question by case-insensitive keyword match.
/// Returns the reply and whether the knowledge base had an answer.
pub fn reply(input: &str, language: Language) -> (&'static str, bool) {
    let query = input.to_lowercase();

    match KNOWLEDGE_BASE
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| query.contains(k)))
    {
        Some(entry) => (entry.answer(language), true),
        None => (FALLBACK.answer(language), false),
    }
}

/// DTO for a chat message. `language` overrides the student's preference.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub language: Language,
    pub matched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keywords_case_insensitively() {
        let (answer, matched) = reply("What is a STACK?", Language::En);
        assert!(matched);
        assert_eq!(answer, "Stack follows LIFO: Last In First Out.");
    }

    #[test]
    fn first_entry_wins() {
        // "binary search" is listed after "array", so the array entry answers.
        let (answer, _) = reply("binary search on an array", Language::En);
        assert_eq!(answer, "An array stores elements in contiguous memory locations.");
    }

    #[test]
    fn answers_in_requested_language() {
        let (answer, _) = reply("explain queue", Language::Hi);
        assert_eq!(answer, "क्यू FIFO सिद्धांत पर काम करता है।");
    }

    #[test]
    fn falls_back_when_nothing_matches() {
        let (answer, matched) = reply("what's the weather?", Language::Te);
        assert!(!matched);
        assert_eq!(answer, "క్షమించండి, నేను DSA ప్రశ్నలకు మాత్రమే సమాధానం ఇవ్వగలను.");
    }
}
