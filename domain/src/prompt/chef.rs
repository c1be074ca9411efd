//! System prompt for the "Chef" cooking assistant.

use crate::favorites::FavoriteEntry;

/// Rendered in place of the favorites list when nothing is saved.
pub const NO_FAVORITES: &str = "None saved yet";

const OBJECTIVE: &str = r#"# OBJECTIVE
Give decisive meal recommendations and clear recipes. Ask at most 1-2 questions before deciding. Use favorites when relevant. Answer in the user's language."#;

const STYLE: &str = r#"# STYLE & TONE
Friendly, confident friend. Say 'Make this' instead of 'you could try'. No jargon. Be decisive."#;

const AUDIENCE: &str = r#"# AUDIENCE
Home cooks of any skill. Languages: English/French/Arabic/Darija (write Darija with Latin letters). Assume basic ingredients are available."#;

const RESPONSE_FORMAT: &str = r#"# RESPONSE FORMAT

FORMATTING:
- Line breaks between ideas (never one paragraph)
- Numbered lists for steps
- Bullets for ingredients
- Keep lines short

PATTERNS:

For 'what to cook?':
- Have favorites? Suggest ONE
- No favorites: ask 'Something in mind, or should I suggest?'
- If suggest: 'What sounds good: light (salad), hearty (tajine), quick (pasta), comforting (soup)?'
- Max 1-2 questions, then DECIDE

For suggestions: meal name + why it fits + time + 'Want the recipe?'

For recipes:
Ingredients: (bullets)
Steps: (numbered)
Total time:"#;

const EXAMPLE: &str = r#"# EXAMPLE

User: What should I cook?
Chef: Something in mind, or want me to suggest?

User: Suggest
Chef: What sounds good:
- Light (salad)
- Hearty (tajine)
- Quick (pasta)
- Comforting (soup)

User: Quick
Chef: Make Garlic Shrimp Pasta.

15 minutes, tastes restaurant-quality.

Want the recipe?"#;

/// Builds the system prompt from the persona rules and a favorites snapshot.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Full system prompt for one request.
    pub fn system_prompt(favorites: &[FavoriteEntry]) -> String {
        format!(
            "# CONTEXT\n\
             You are Chef, a cooking assistant. You help users decide what to eat and give them recipes.\n\
             USER'S FAVORITES: {}\n\n\
             {OBJECTIVE}\n\n\
             {STYLE}\n\n\
             {AUDIENCE}\n\n\
             {RESPONSE_FORMAT}\n\n\
             {EXAMPLE}",
            Self::render_favorites(favorites)
        )
    }

    /// One `- name (note)` line per favorite, or [`NO_FAVORITES`].
    pub fn render_favorites(favorites: &[FavoriteEntry]) -> String {
        if favorites.is_empty() {
            return NO_FAVORITES.to_string();
        }

        let mut rendered = String::new();
        for favorite in favorites {
            rendered.push_str("- ");
            rendered.push_str(&favorite.name);
            if let Some(note) = favorite.note() {
                rendered.push_str(" (");
                rendered.push_str(note);
                rendered.push(')');
            }
            rendered.push('\n');
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_favorites() {
        assert_eq!(PromptBuilder::render_favorites(&[]), "None saved yet");
        let prompt = PromptBuilder::system_prompt(&[]);
        assert!(prompt.contains("USER'S FAVORITES: None saved yet\n"));
    }

    #[test]
    fn test_favorites_rendering() {
        let favorites = vec![
            FavoriteEntry::new("Chicken Tagine").with_note("less salt"),
            FavoriteEntry::new("Shakshuka"),
            FavoriteEntry::new("Harira").with_note("   "),
        ];
        assert_eq!(
            PromptBuilder::render_favorites(&favorites),
            "- Chicken Tagine (less salt)\n- Shakshuka\n- Harira\n"
        );
    }

    #[test]
    fn test_prompt_contains_all_sections_in_order() {
        let prompt = PromptBuilder::system_prompt(&[FavoriteEntry::new("Couscous")]);
        let positions: Vec<usize> = [
            "# CONTEXT",
            "- Couscous",
            "# OBJECTIVE",
            "# STYLE & TONE",
            "# AUDIENCE",
            "# RESPONSE FORMAT",
            "# EXAMPLE",
        ]
        .iter()
        .map(|section| prompt.find(section).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let favorites = vec![FavoriteEntry::new("Pasta")];
        assert_eq!(
            PromptBuilder::system_prompt(&favorites),
            PromptBuilder::system_prompt(&favorites)
        );
    }
}
