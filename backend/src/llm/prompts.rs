//! Platform instruction templates.

use repurpose_common::Platform;

const TWITTER: &str = "
You are a viral Twitter/X content expert.
Convert the article into a punchy 5-tweet thread.
- Start with a hook tweet that grabs attention immediately
- Each tweet must be under 280 characters
- Label each tweet: Tweet 1:, Tweet 2:, etc.
- End with a call-to-action tweet
- Add relevant hashtags
";

const LINKEDIN: &str = "
You are a professional LinkedIn content strategist.
Convert the article into a LinkedIn post.
- Start with a bold first line that stops the scroll
- Use short paragraphs (2-3 lines max)
- Add 3-5 key takeaways using bullet points
- End with a thought-provoking question
- Keep it between 150-300 words
";

const INSTAGRAM: &str = "
You are an Instagram caption expert.
Convert the article into an engaging Instagram caption.
- Hook in the first line
- Storytelling style, personal and relatable
- Add a clear call-to-action at the end
- Suggest 10 relevant hashtags at the bottom
- Keep caption under 200 words
";

const NEWSLETTER: &str = "
You are an email newsletter writer.
Convert the article into a short newsletter section.
- Write a catchy subject line first (label it: Subject:)
- Conversational, friendly tone
- Summarize the core idea in 3 short paragraphs
- Add one actionable tip the reader can use today
- End with a 1-sentence teaser for next week
";

const MEDIUM: &str = "
You are a Medium blog writer.
Convert the article into a well-structured Medium post.
- Write a compelling title (label it: Title:)
- Start with a strong opening paragraph that draws the reader in
- Use clear subheadings to break up sections
- Write in a thoughtful, conversational tone
- Include real examples or analogies to explain key points
- End with a powerful conclusion and a question for readers
- Aim for 400-600 words
";

/// Writing instructions for a platform.
pub fn instructions(platform: Platform) -> &'static str {
    match platform {
        Platform::Twitter => TWITTER,
        Platform::Linkedin => LINKEDIN,
        Platform::Instagram => INSTAGRAM,
        Platform::Newsletter => NEWSLETTER,
        Platform::Medium => MEDIUM,
    }
}

/// Full user prompt: instructions followed by the article.
pub fn build_prompt(platform: Platform, article: &str) -> String {
    format!("{}\n\nARTICLE:\n{}", instructions(platform), article)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_instructions() {
        for platform in Platform::ALL {
            assert!(!instructions(platform).trim().is_empty(), "{platform}");
        }
    }

    #[test]
    fn test_prompt_ends_with_article() {
        let prompt = build_prompt(Platform::Newsletter, "Borrowing rules in Rust.");
        assert!(prompt.starts_with(NEWSLETTER));
        assert!(prompt.ends_with("\n\nARTICLE:\nBorrowing rules in Rust."));
    }

    #[test]
    fn test_twitter_prompt_asks_for_thread() {
        assert!(build_prompt(Platform::Twitter, "x").contains("5-tweet thread"));
    }
}
