//! The bundled door-and-button story.
//!
//! The world has one condition: whether the button has been pressed. The door
//! only lets the reader out once it has. The ending is a single page that can
//! restart the story or submit the form.

use crate::error::AuthoringError;
use crate::models::{Section, SingleChoice};
use crate::story::{PageIds, Scene, SingleScene, Story, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Room {
    pub button_pressed: bool,
}

impl Room {
    pub const START: Room = Room {
        button_pressed: false,
    };
}

impl WorldState for Room {
    fn count() -> usize {
        bool::count()
    }

    fn encode(&self) -> usize {
        self.button_pressed.encode()
    }

    fn all() -> impl Iterator<Item = Self> {
        bool::all().map(|button_pressed| Room { button_pressed })
    }
}

pub struct DoorScene;

impl Scene<Room> for DoorScene {
    fn generate_section(&self, ws: &Room, ids: &PageIds<Room>) -> Result<Section, AuthoringError> {
        let description = if ws.button_pressed {
            "The door is open now."
        } else {
            "There is a closed door."
        };

        let mut question = SingleChoice::new("What to do now?", "")
            .navigate("Look back", ids.scene::<ButtonScene>(ws)?);
        if ws.button_pressed {
            question = question.navigate("Get out", ids.single::<EndingScene>()?);
        }

        Section::new(ids.scene::<Self>(ws)?, "Door", description).with_item(question)
    }
}

pub struct ButtonScene;

impl Scene<Room> for ButtonScene {
    fn generate_section(&self, ws: &Room, ids: &PageIds<Room>) -> Result<Section, AuthoringError> {
        let description = if ws.button_pressed {
            "The button is pressed."
        } else {
            "There is a button."
        };

        let mut question = SingleChoice::new("What to do now?", "")
            .navigate("Look back", ids.scene::<DoorScene>(ws)?);
        if !ws.button_pressed {
            let pressed = Room {
                button_pressed: true,
            };
            question = question.navigate("Press button", ids.scene::<ButtonScene>(&pressed)?);
        }

        Section::new(ids.scene::<Self>(ws)?, "Button", description).with_item(question)
    }
}

pub struct EndingScene;

impl SingleScene<Room> for EndingScene {
    fn generate_section(&self, ids: &PageIds<Room>) -> Result<Section, AuthoringError> {
        let question = SingleChoice::new("Restart", "")
            .navigate("Restart", ids.scene::<DoorScene>(&Room::START)?)
            .submit("End game");

        Section::new(ids.single::<Self>()?, "Ending", "You escaped. Yay!").with_item(question)
    }
}

/// Build the door-and-button story, opening on the closed door.
pub fn story() -> Result<Story<Room>, AuthoringError> {
    Story::<Room>::builder("Simple Game")
        .scene(DoorScene)
        .scene(ButtonScene)
        .single(EndingScene)
        .start_at::<DoorScene>(Room::START)
        .build()
}
