use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique, linearly addressable page identifier.
///
/// Scenes get page ids from the identifier allocator. A raw number that no
/// scene owns is caught when the story is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId(pub u32);

impl PageId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a choice leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceTarget {
    /// Jump to another page.
    NavigateTo(PageId),
    /// End the story by submitting the form.
    Submit,
}

impl ChoiceTarget {
    pub fn page(&self) -> Option<PageId> {
        match self {
            Self::NavigateTo(id) => Some(*id),
            Self::Submit => None,
        }
    }
}

/// An image attached to a question or to one of its choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTag {
    pub content_uri: String,
    pub alt_text: String,
    pub source_uri: String,
}

impl ImageTag {
    pub fn new(
        content_uri: impl Into<String>,
        alt_text: impl Into<String>,
        source_uri: impl Into<String>,
    ) -> Self {
        Self {
            content_uri: content_uri.into(),
            alt_text: alt_text.into(),
            source_uri: source_uri.into(),
        }
    }
}

/// One selectable answer of a [`SingleChoice`] question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub target: ChoiceTarget,
    pub image: Option<ImageTag>,
}

/// A radio-button question whose answers drive page navigation.
///
/// Defaults follow what the story pages need most of the time: answers are
/// shown in authoring order and an answer is required to move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleChoice {
    pub title: String,
    pub description: String,
    pub choices: Vec<Choice>,
    pub shuffle: bool,
    pub required: bool,
    pub image: Option<ImageTag>,
}

impl SingleChoice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
            shuffle: false,
            required: true,
            image: None,
        }
    }

    /// Add a choice that jumps to `page`.
    pub fn navigate(mut self, label: impl Into<String>, page: PageId) -> Self {
        self.choices.push(Choice {
            label: label.into(),
            target: ChoiceTarget::NavigateTo(page),
            image: None,
        });
        self
    }

    /// Add a choice that submits the form.
    pub fn submit(mut self, label: impl Into<String>) -> Self {
        self.choices.push(Choice {
            label: label.into(),
            target: ChoiceTarget::Submit,
            image: None,
        });
        self
    }

    /// Add a fully specified choice.
    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn shuffled(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_image(mut self, image: ImageTag) -> Self {
        self.image = Some(image);
        self
    }
}

/// A static block of text with no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub title: String,
    pub description: String,
}

impl Text {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A question answered with free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuestion {
    pub title: String,
    pub description: String,
    /// Multi-line answer box instead of a single line.
    pub paragraph: bool,
    pub required: bool,
}

impl TextQuestion {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            paragraph: false,
            required: false,
        }
    }

    pub fn paragraph(mut self, paragraph: bool) -> Self {
        self.paragraph = paragraph;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// The marker that opens a page and carries its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBreak {
    pub id: PageId,
    pub title: String,
    pub description: String,
}

/// One entry on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    SingleChoice(SingleChoice),
    Text(Text),
    TextQuestion(TextQuestion),
    PageBreak(PageBreak),
}

impl Item {
    pub fn is_page_break(&self) -> bool {
        matches!(self, Self::PageBreak(_))
    }

    /// Navigation targets of every choice on this item, in order.
    pub fn targets(&self) -> impl Iterator<Item = ChoiceTarget> + '_ {
        let choices: &[Choice] = match self {
            Self::SingleChoice(question) => &question.choices,
            Self::Text(_) | Self::TextQuestion(_) | Self::PageBreak(_) => &[],
        };
        choices.iter().map(|c| c.target)
    }
}

impl From<SingleChoice> for Item {
    fn from(question: SingleChoice) -> Self {
        Self::SingleChoice(question)
    }
}

impl From<Text> for Item {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<TextQuestion> for Item {
    fn from(question: TextQuestion) -> Self {
        Self::TextQuestion(question)
    }
}

impl From<PageBreak> for Item {
    fn from(page_break: PageBreak) -> Self {
        Self::PageBreak(page_break)
    }
}
