//! Keyword-matched canned replies with simulated latency.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Which canned reply an input maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hire,
    Weakness,
    Flagship,
    Stack,
    Default,
}

impl Category {
    pub fn template(self) -> &'static str {
        match self {
            Category::Default => DEFAULT_REPLY,
            Category::Hire => HIRE_REPLY,
            Category::Weakness => WEAKNESS_REPLY,
            Category::Flagship => FLAGSHIP_REPLY,
            Category::Stack => STACK_REPLY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hire => "hire",
            Category::Weakness => "weakness",
            Category::Flagship => "raven",
            Category::Stack => "stack",
            Category::Default => "default",
        }
    }
}

/// One row of the matching table: any keyword hit selects the category.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Checked top to bottom, first hit wins.
pub const RULES: &[Rule] = &[
    Rule {
        category: Category::Hire,
        keywords: &["hire", "why"],
    },
    Rule {
        category: Category::Weakness,
        keywords: &["weakness", "shouldn't"],
    },
    Rule {
        category: Category::Flagship,
        keywords: &["raven", "project"],
    },
    Rule {
        category: Category::Stack,
        keywords: &["stack", "tech", "skill"],
    },
];

pub fn classify(input: &str) -> Category {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .unwrap_or(Category::Default)
}

/// Inclusive bounds for the fake "thinking" time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub fn new(a: Duration, b: Duration) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(Duration::from_millis(800), Duration::from_millis(2000))
    }
}

/// Stateless resolver; cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct CannedResponder {
    delay: DelayRange,
}

impl CannedResponder {
    pub fn new(delay: DelayRange) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> DelayRange {
        self.delay
    }

    /// Waits out the simulated latency, then answers. Never fails.
    pub async fn resolve(&self, input: &str) -> String {
        let wait = self.delay.sample();
        debug!(wait_ms = wait.as_millis() as u64, "simulating reply latency");
        tokio::time::sleep(wait).await;
        self.respond_now(input)
    }

    pub fn respond_now(&self, input: &str) -> String {
        let category = classify(input);
        debug!(category = category.as_str(), "matched canned reply");
        category.template().to_string()
    }
}

const DEFAULT_REPLY: &str = "I'm Muhammed—a full-stack engineer who believes code should be poetry, not prose. 

I've shipped enterprise automation worth €5M, built AI legal platforms in Helsinki, and I'm currently revolutionizing P2P logistics with Raven.

What would you like to know?";

const HIRE_REPLY: &str = "Why should you hire me? Simple—I don't just write code, I solve problems.

• €5M in automation savings at Hogarth Worldwide
• Built AI infrastructure for Justice 4.0
• Currently building Raven: P2P international logistics

I bring a rare combination of deep technical skills and product thinking.";

const WEAKNESS_REPLY: &str = "\"Why shouldn't we hire him?\" Nice try. 

My only weakness? I'm obsessed with clean architecture. I've been known to refactor perfectly working code because the abstraction wasn't elegant enough.

But that obsession is exactly why my code scales.";

const FLAGSHIP_REPLY: &str = "Raven is my brainchild—a peer-to-peer international logistics platform.

Instead of paying €50+ for small package delivery, Raven connects senders with travelers who have extra luggage space. Everyone wins:
• Senders save up to 80%
• Travelers earn extra income
• Fewer carbon emissions

Tech: NestJS, React Native (Expo + Tamagui), Stream API, Azure AD B2C.";

const STACK_REPLY: &str = "My technical arsenal:

Frontend: React, Next.js, React Native, TypeScript
Backend: Node.js, NestJS, Python, PostgreSQL
Cloud: AWS, Azure, Docker, Kubernetes
AI/ML: Azure ML SDK, LLM integration

I'm currently deep into Cybersecurity for my 90-day sprint.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hire_question() {
        assert_eq!(classify("Why should you hire me?"), Category::Hire);
    }

    #[test]
    fn test_raven_question() {
        assert_eq!(classify("tell me about Raven"), Category::Flagship);
    }

    #[test]
    fn test_gibberish_falls_back_to_default() {
        assert_eq!(classify("random gibberish"), Category::Default);
        assert_eq!(classify(""), Category::Default);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(classify("WHAT'S YOUR TECH STACK"), Category::Stack);
        assert_eq!(classify("Biggest WEAKNESS?"), Category::Weakness);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // "why" outranks "shouldn't"
        assert_eq!(classify("why shouldn't we hire him"), Category::Hire);
        // "weakness" outranks "project"
        assert_eq!(classify("your weakness on this project"), Category::Weakness);
        // "project" outranks "skill"
        assert_eq!(classify("project skills"), Category::Flagship);
    }

    #[test]
    fn test_substring_match() {
        // "techno" contains "tech"
        assert_eq!(classify("do you like techno"), Category::Stack);
        // "shouldn't" without "why"
        assert_eq!(classify("tell me shouldn't"), Category::Weakness);
    }

    #[test]
    fn test_respond_now_returns_template() {
        let responder = CannedResponder::default();
        assert_eq!(responder.respond_now("hire"), HIRE_REPLY);
        assert_eq!(responder.respond_now("hello"), DEFAULT_REPLY);
    }

    #[test]
    fn test_hire_template_text() {
        let expected = "Why should you hire me? Simple\u{2014}I don't just write code, I solve problems.\n\
            \n\
            • €5M in automation savings at Hogarth Worldwide\n\
            • Built AI infrastructure for Justice 4.0\n\
            • Currently building Raven: P2P international logistics\n\
            \n\
            I bring a rare combination of deep technical skills and product thinking.";
        assert_eq!(Category::Hire.template(), expected);
    }

    #[test]
    fn test_templates_keep_trailing_spaces() {
        assert!(Category::Default
            .template()
            .starts_with("I'm Muhammed\u{2014}a full-stack engineer who believes code should be poetry, not prose. \n"));
        assert!(Category::Weakness
            .template()
            .starts_with("\"Why shouldn't we hire him?\" Nice try. \n"));
        assert!(Category::Flagship
            .template()
            .starts_with("Raven is my brainchild\u{2014}a peer-to-peer"));
    }

    #[test]
    fn test_delay_range_orders_bounds() {
        let range = DelayRange::new(Duration::from_millis(50), Duration::from_millis(10));
        assert_eq!(range.min(), Duration::from_millis(10));
        assert_eq!(range.max(), Duration::from_millis(50));
        for _ in 0..100 {
            let d = range.sample();
            assert!(d >= range.min() && d <= range.max());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_waits_within_bounds() {
        let responder = CannedResponder::default();
        for _ in 0..10 {
            let start = tokio::time::Instant::now();
            let reply = responder.resolve("Why should you hire me?").await;
            let waited = start.elapsed();
            assert_eq!(reply, HIRE_REPLY);
            assert!(waited >= Duration::from_millis(800), "waited {waited:?}");
            // timer wheel rounds deadlines up to the next millisecond
            assert!(waited <= Duration::from_millis(2001), "waited {waited:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_resolve() {
        let responder = CannedResponder::new(DelayRange::instant());
        let start = tokio::time::Instant::now();
        let reply = responder.resolve("what stack do you use").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(reply, STACK_REPLY);
    }
}
