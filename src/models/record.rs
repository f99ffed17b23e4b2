//! Records in the form publishing service's item format.
//!
//! Field names follow the service's camelCase JSON. A page break carries its
//! page id in `itemId`, apart from the rest of its content, because the service
//! creates page markers in their own pass before any other item.

use serde::Serialize;

use super::{ChoiceTarget, ImageTag, Item, PageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(flatten)]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    QuestionItem(QuestionItem),
    TextItem(Empty),
    PageBreakItem(Empty),
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionItem {
    pub question: Question,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    ChoiceQuestion(ChoiceQuestion),
    TextQuestion(TextQuestionRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceType {
    Radio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceQuestion {
    #[serde(rename = "type")]
    pub choice_type: ChoiceType,
    pub options: Vec<OptionRecord>,
    pub shuffle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextQuestionRecord {
    pub paragraph: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRecord {
    pub value: String,
    #[serde(flatten)]
    pub go_to: GoTo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageTag>,
}

/// `goToSectionId: "<id>"` or `goToAction: "SUBMIT_FORM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GoTo {
    GoToSectionId(String),
    GoToAction(GoToAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoToAction {
    SubmitForm,
}

/// Page ids travel as decimal strings.
pub fn page_ref(id: PageId) -> String {
    id.to_string()
}

impl From<ChoiceTarget> for GoTo {
    fn from(target: ChoiceTarget) -> Self {
        match target {
            ChoiceTarget::NavigateTo(id) => Self::GoToSectionId(page_ref(id)),
            ChoiceTarget::Submit => Self::GoToAction(GoToAction::SubmitForm),
        }
    }
}

impl Item {
    /// Render this item in the service's record format.
    pub fn to_record(&self) -> ItemRecord {
        match self {
            Item::SingleChoice(question) => ItemRecord {
                title: question.title.clone(),
                description: question.description.clone(),
                item_id: None,
                kind: ItemKind::QuestionItem(QuestionItem {
                    question: Question {
                        required: question.required,
                        kind: QuestionKind::ChoiceQuestion(ChoiceQuestion {
                            choice_type: ChoiceType::Radio,
                            options: question
                                .choices
                                .iter()
                                .map(|choice| OptionRecord {
                                    value: choice.label.clone(),
                                    go_to: choice.target.into(),
                                    image: choice.image.clone(),
                                })
                                .collect(),
                            shuffle: question.shuffle,
                        }),
                    },
                    image: question.image.clone(),
                }),
            },
            Item::Text(text) => ItemRecord {
                title: text.title.clone(),
                description: text.description.clone(),
                item_id: None,
                kind: ItemKind::TextItem(Empty::default()),
            },
            Item::TextQuestion(question) => ItemRecord {
                title: question.title.clone(),
                description: question.description.clone(),
                item_id: None,
                kind: ItemKind::QuestionItem(QuestionItem {
                    question: Question {
                        required: question.required,
                        kind: QuestionKind::TextQuestion(TextQuestionRecord {
                            paragraph: question.paragraph,
                        }),
                    },
                    image: None,
                }),
            },
            Item::PageBreak(page) => ItemRecord {
                title: page.title.clone(),
                description: page.description.clone(),
                item_id: Some(page_ref(page.id)),
                kind: ItemKind::PageBreakItem(Empty::default()),
            },
        }
    }
}
