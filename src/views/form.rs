//! Editor form state and tag parsing.

use crate::models::{BlogPost, BlogPostInput};

/// Split a comma-separated tag field into tags
///
/// Segments are trimmed and empty ones dropped; order and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render tags back into the single-field form, `", "`-separated
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Required fields left blank on submit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill in: {}", .missing.join(", "))]
pub struct FormError {
    pub missing: Vec<&'static str>,
}

/// Draft of a post being created or edited
///
/// Tags are parsed as soon as the tag field changes, so whatever irregular
/// spacing the author typed is not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PostForm {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub image: String,
    pub is_published: bool,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            tags: Vec::new(),
            read_time: String::new(),
            image: String::new(),
            is_published: true,
        }
    }
}

impl PostForm {
    /// A form pre-filled with a post's current values
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
            read_time: post.read_time.clone(),
            image: post.image.clone(),
            is_published: post.is_published,
        }
    }

    /// Update the tags from the raw tag field
    pub fn set_tags_text(&mut self, text: &str) {
        self.tags = parse_tags(text);
    }

    /// The tag field as shown to the author
    pub fn tags_text(&self) -> String {
        join_tags(&self.tags)
    }

    /// Validate and convert into store input; every field but tags is required
    pub fn to_input(&self) -> Result<BlogPostInput, FormError> {
        let input = BlogPostInput {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            read_time: self.read_time.clone(),
            image: self.image.clone(),
            is_published: self.is_published,
        };

        let missing = input.missing_fields();
        if missing.is_empty() {
            Ok(input)
        } else {
            Err(FormError { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags("React, JavaScript,  Tutorial"),
            vec!["React", "JavaScript", "Tutorial"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,, ").is_empty());
        assert_eq!(parse_tags("a,,a , b"), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_tags_text_is_lossy() {
        let mut form = PostForm::default();
        form.set_tags_text("React,JavaScript ,,  Tutorial");
        assert_eq!(form.tags_text(), "React, JavaScript, Tutorial");
    }

    #[test]
    fn test_default_form_is_published_and_invalid() {
        let form = PostForm::default();
        assert!(form.is_published);
        let err = form.to_input().expect_err("Empty form must not validate");
        assert_eq!(
            err.missing,
            vec!["title", "excerpt", "content", "read_time", "image"]
        );
        assert_eq!(
            err.to_string(),
            "Please fill in: title, excerpt, content, read_time, image"
        );
    }

    #[test]
    fn test_form_without_tags_is_valid() {
        let form = PostForm {
            title: "T".into(),
            excerpt: "E".into(),
            content: "C".into(),
            read_time: "1 min read".into(),
            image: "https://example.com/i.png".into(),
            ..PostForm::default()
        };
        let input = form.to_input().expect("Tags are optional");
        assert!(input.tags.is_empty());
        assert!(input.is_published);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Parsed tags are trimmed, non-empty and comma-free.
        #[test]
        fn parsed_tags_are_clean(text in "[ a-zA-Z,]{0,40}") {
            for tag in parse_tags(&text) {
                prop_assert!(!tag.is_empty());
                prop_assert_eq!(tag.trim(), tag.as_str());
                prop_assert!(!tag.contains(','));
            }
        }

        /// Re-joining and re-parsing a parsed tag list changes nothing.
        #[test]
        fn parse_join_is_stable(text in "[ a-zA-Z,]{0,40}") {
            let tags = parse_tags(&text);
            prop_assert_eq!(parse_tags(&join_tags(&tags)), tags);
        }
    }
}
