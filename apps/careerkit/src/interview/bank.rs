//! Static interview question banks, ten per category.

use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankQuestion {
    pub question: &'static str,
    pub tip: &'static str,
}

const fn q(question: &'static str, tip: &'static str) -> BankQuestion {
    BankQuestion { question, tip }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Behavioral,
    Technical,
    SystemDesign,
    CultureFit,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Behavioral,
        Category::Technical,
        Category::SystemDesign,
        Category::CultureFit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Behavioral => "behavioral",
            Category::Technical => "technical",
            Category::SystemDesign => "system_design",
            Category::CultureFit => "culture_fit",
        }
    }

    pub fn questions(self) -> &'static [BankQuestion] {
        match self {
            Category::Behavioral => BEHAVIORAL,
            Category::Technical => TECHNICAL,
            Category::SystemDesign => SYSTEM_DESIGN,
            Category::CultureFit => CULTURE_FIT,
        }
    }

    pub fn general_tip(self) -> &'static str {
        match self {
            Category::Behavioral => {
                "Use the STAR method (Situation, Task, Action, Result) to structure your answers."
            }
            Category::Technical => {
                "Think out loud! Interviewers want to understand your problem-solving process."
            }
            Category::SystemDesign => {
                "Start with requirements, then high-level design, then dive into specific components."
            }
            Category::CultureFit => "Research the company's values and mission before the interview.",
        }
    }
}

/// Lower-cases, maps spaces to `_` and drops parentheses, then applies the
/// loose aliases: anything mentioning "coding" is technical, "system" or
/// "design" is system design, "culture" or "fit" is culture fit.
pub fn normalize_category(input: &str) -> Result<Category, AppError> {
    let normalized = input
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace(['(', ')'], "");

    let aliased = if normalized.contains("coding") {
        "technical"
    } else if normalized.contains("system") || normalized.contains("design") {
        "system_design"
    } else if normalized.contains("culture") || normalized.contains("fit") {
        "culture_fit"
    } else {
        normalized.as_str()
    };

    Category::ALL
        .into_iter()
        .find(|c| c.as_str() == aliased)
        .ok_or_else(|| {
            let available: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
            AppError::Validation(format!(
                "Unknown category: {input}. Available: {}",
                available.join(", ")
            ))
        })
}

const BEHAVIORAL: &[BankQuestion] = &[
    q(
        "Tell me about a time you faced a difficult technical challenge. How did you solve it?",
        "Use the STAR method: Situation, Task, Action, Result",
    ),
    q(
        "Describe a situation where you disagreed with a teammate. How did you handle it?",
        "Focus on collaboration and finding common ground",
    ),
    q(
        "Give an example of when you had to learn a new technology quickly. What was your approach?",
        "Highlight your learning process and adaptability",
    ),
    q(
        "Tell me about a project you're most proud of. What was your specific contribution?",
        "Be specific about YOUR role and quantify impact if possible",
    ),
    q(
        "Describe a time when you failed. What did you learn from it?",
        "Be honest, focus on growth and lessons learned",
    ),
    q(
        "Tell me about a time you had to meet a tight deadline.",
        "Discuss prioritization, communication, and time management",
    ),
    q(
        "Give an example of when you took initiative without being asked.",
        "Show proactivity and impact",
    ),
    q(
        "Describe how you handled receiving critical feedback.",
        "Show emotional intelligence and growth mindset",
    ),
    q(
        "Tell me about a time you mentored someone or helped a teammate grow.",
        "Highlight leadership and communication skills",
    ),
    q(
        "Describe a situation where you had to work with incomplete information.",
        "Show decision-making skills under uncertainty",
    ),
];

const TECHNICAL: &[BankQuestion] = &[
    q(
        "Reverse a linked list in-place. What's the time and space complexity?",
        "Walk through your approach before coding. O(n) time, O(1) space",
    ),
    q(
        "Design a LRU cache with O(1) get and put operations.",
        "Consider using a hash map + doubly linked list",
    ),
    q(
        "Find the kth largest element in an unsorted array. Can you do better than O(n log n)?",
        "QuickSelect gives O(n) average case",
    ),
    q(
        "Implement a rate limiter for an API endpoint.",
        "Consider token bucket or sliding window algorithms",
    ),
    q(
        "Given a binary tree, find the lowest common ancestor of two nodes.",
        "Think about recursive approach - what makes a node the LCA?",
    ),
    q(
        "Detect a cycle in a linked list. Can you do it in O(1) space?",
        "Floyd's cycle detection (fast/slow pointers)",
    ),
    q(
        "Implement a trie (prefix tree) with insert, search, and startsWith methods.",
        "Each node stores children in a map/array",
    ),
    q(
        "Find all permutations of a string with unique characters.",
        "Backtracking approach - swap and recurse",
    ),
    q(
        "Merge k sorted lists into one sorted list.",
        "Use a min-heap for O(n log k) solution",
    ),
    q(
        "Explain the difference between TCP and UDP. When would you use each?",
        "TCP: reliability. UDP: speed/real-time. Give examples",
    ),
];

const SYSTEM_DESIGN: &[BankQuestion] = &[
    q(
        "Design a URL shortening service like bit.ly",
        "Discuss hashing, database schema, caching, and scale",
    ),
    q(
        "How would you design Twitter's feed system?",
        "Consider fan-out approaches, caching, and real-time updates",
    ),
    q(
        "Design a distributed cache system",
        "Discuss partitioning, replication, consistency, and eviction",
    ),
    q(
        "How would you build a real-time chat application?",
        "Consider WebSockets, message queues, and scaling",
    ),
    q(
        "Design a ride-sharing service like Uber",
        "Focus on matching, location services, and pricing",
    ),
    q(
        "Design a video streaming service like Netflix",
        "Discuss CDNs, encoding, adaptive bitrate streaming",
    ),
    q(
        "How would you design a notification system?",
        "Consider different channels, priorities, and rate limiting",
    ),
    q(
        "Design a distributed file storage system like Dropbox",
        "Discuss chunking, deduplication, sync conflicts",
    ),
    q(
        "Design a search autocomplete system",
        "Consider tries, caching, personalization",
    ),
    q(
        "How would you design a web crawler?",
        "Discuss politeness, deduplication, distributed crawling",
    ),
];

const CULTURE_FIT: &[BankQuestion] = &[
    q(
        "Why do you want to work at this company?",
        "Research the company's mission, values, and recent news",
    ),
    q(
        "What kind of work environment do you thrive in?",
        "Be honest but also show adaptability",
    ),
    q(
        "How do you handle feedback and criticism?",
        "Show growth mindset and emotional intelligence",
    ),
    q(
        "Where do you see yourself in 5 years?",
        "Show ambition while being realistic",
    ),
    q(
        "What motivates you to do your best work?",
        "Be authentic - connect to the role if possible",
    ),
    q(
        "How do you stay updated with industry trends?",
        "Mention specific resources, communities, or practices",
    ),
    q(
        "Describe your ideal team dynamic.",
        "Show you value collaboration and diverse perspectives",
    ),
    q(
        "What's something you're passionate about outside of work?",
        "Show you're well-rounded, connect to transferable skills",
    ),
    q(
        "How do you handle work-life balance?",
        "Show you're sustainable and productive",
    ),
    q(
        "What questions do you have for us?",
        "Always have 2-3 thoughtful questions prepared",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bank_has_ten_questions() {
        for category in Category::ALL {
            assert_eq!(category.questions().len(), 10, "{}", category.as_str());
        }
    }

    #[test]
    fn test_normalize_exact_and_spaced_names() {
        assert_eq!(normalize_category("Behavioral").unwrap(), Category::Behavioral);
        assert_eq!(normalize_category("technical").unwrap(), Category::Technical);
        assert_eq!(normalize_category("System Design").unwrap(), Category::SystemDesign);
        assert_eq!(normalize_category("culture fit").unwrap(), Category::CultureFit);
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize_category("Technical (Coding)").unwrap(), Category::Technical);
        assert_eq!(normalize_category("design").unwrap(), Category::SystemDesign);
        assert_eq!(normalize_category("Team Fit").unwrap(), Category::CultureFit);
    }

    #[test]
    fn test_unknown_category_lists_available() {
        let err = normalize_category("astrology").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Unknown category: astrology. \
             Available: behavioral, technical, system_design, culture_fit"
        );
    }
}
