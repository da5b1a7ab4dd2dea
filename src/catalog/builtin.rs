//! Static catalog bundled with the crate.
//!
//! Used when no catalog file is configured and as the local source for the
//! tool-of-the-day fallback.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::{Catalog, Category, CategoryGroup, PricingTier, Tool};

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, date)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

pub fn builtin_catalog() -> Catalog {
    use PricingTier::*;

    Catalog::new(vec![
        CategoryGroup::new(
            Category::new("chatbots", "Chatbots & Assistants"),
            vec![
                Tool::builder("ChatGPT", "chatbots", Freemium, day(2024, 1, 10))
                    .url("https://chat.openai.com")
                    .description("Conversational assistant for writing, analysis and code.")
                    .tags(["chat", "writing", "coding"])
                    .build(),
                Tool::builder("Claude", "chatbots", Freemium, day(2024, 3, 4))
                    .url("https://claude.ai")
                    .description("Assistant focused on long documents and careful reasoning.")
                    .tags(["chat", "writing", "analysis"])
                    .build(),
                Tool::builder("HuggingChat", "chatbots", Free, day(2024, 5, 22))
                    .url("https://huggingface.co/chat")
                    .description("Chat interface over open-weight models.")
                    .tags(["chat", "open-models"])
                    .build(),
            ],
        ),
        CategoryGroup::new(
            Category::new("image-generation", "Image Generation"),
            vec![
                Tool::builder("Midjourney", "image-generation", Paid, day(2024, 2, 14))
                    .url("https://www.midjourney.com")
                    .description("Text-to-image generation with a distinctive style.")
                    .tags(["image", "art"])
                    .build(),
                Tool::builder("Stable Diffusion", "image-generation", OpenSource, day(2024, 2, 14))
                    .url("https://stability.ai")
                    .description("Open text-to-image model family.")
                    .tags(["image", "open-models"])
                    .build(),
                Tool::builder("Leonardo AI", "image-generation", Freemium, day(2025, 1, 8))
                    .url("https://leonardo.ai")
                    .description("Image generation for game assets and concept art.")
                    .tags(["image", "design"])
                    .build(),
            ],
        ),
        CategoryGroup::new(
            Category::new("code-assistants", "Code Assistants"),
            vec![
                Tool::builder("GitHub Copilot", "code-assistants", Paid, day(2024, 4, 1))
                    .url("https://github.com/features/copilot")
                    .description("Inline code completion in the editor.")
                    .tags(["coding", "ide"])
                    .build(),
                Tool::builder("Tabby", "code-assistants", OpenSource, day(2024, 9, 17))
                    .url("https://tabby.tabbyml.com")
                    .description("Self-hosted code completion server.")
                    .tags(["coding", "self-hosted"])
                    .build(),
            ],
        ),
        CategoryGroup::new(
            Category::new("audio", "Audio & Voice"),
            vec![
                Tool::builder("ElevenLabs", "audio", Freemium, day(2024, 6, 30))
                    .url("https://elevenlabs.io")
                    .description("Speech synthesis and voice cloning.")
                    .tags(["voice", "tts"])
                    .build(),
                Tool::builder("Whisper", "audio", OpenSource, day(2024, 7, 2))
                    .url("https://github.com/openai/whisper")
                    .description("Speech recognition model.")
                    .tags(["speech", "transcription", "open-models"])
                    .build(),
            ],
        ),
        CategoryGroup::new(
            Category::new("productivity", "Productivity"),
            vec![
                Tool::builder("Notion AI", "productivity", Paid, day(2025, 3, 12))
                    .url("https://www.notion.so/product/ai")
                    .description("Writing and summarization inside Notion workspaces.")
                    .tags(["writing", "notes"])
                    .build(),
                Tool::builder("Otter.ai", "productivity", Freemium, day(2025, 6, 1))
                    .url("https://otter.ai")
                    .description("Meeting transcription and notes.")
                    .tags(["meetings", "transcription"])
                    .build(),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.categories().len(), 5);
        assert_eq!(catalog.len(), 12);
        for tool in catalog.tools() {
            assert!(catalog.has_category(&tool.category), "{} has unknown category", tool.id);
        }
    }
}
