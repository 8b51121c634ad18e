//! Prompt templates and engineering

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{Error, Result};

/// A prompt template using Handlebars syntax
pub struct PromptTemplate {
    /// Template name
    name: String,
    /// Handlebars registry
    registry: Handlebars<'static>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self> {
        let name = name.into();
        let mut registry = Handlebars::new();
        // Prompts are plain text, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        registry
            .register_template_string(&name, template)
            .map_err(|e| Error::Internal(format!("Invalid template: {}", e)))?;

        Ok(PromptTemplate { name, registry })
    }

    /// Render the template with given data
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        Ok(self.registry.render(&self.name, data)?)
    }
}

/// Instructions given to the game-master agent
pub const GAME_MASTER_INSTRUCTIONS: &str = "You are a game master and must help conduct a game for the user. \
Whenever the start_game function is called, you must always have the user's interests with you. \
If the message doesn't have the user's interests, you MUST ask the user for their interests. \
Once the interests are clear, you can call the start_game function with the user's interests and the current location. \
There will be other functions that you may call according to the tool descriptions.";

/// Situation the agent plays in
pub const GAME_MASTER_SITUATION: &str = "You are RiddleMaster, an Agent that can conduct games for users. \
Users will send you messages with different intents. They can be about starting a new game, \
verifying if the locations they have guessed are correct, or if they want a hint. \
You will use the tools at your disposal to help the users and make the game experience enjoyable. \
Follow the instructions strictly.";

/// Interests -> maps search keywords
pub const KEYWORDS_TEMPLATE: &str = "This list of interests come from a group of people interested in \
exploring a city. Take this list of interests and generate exact keywords to pass to the Google Maps \
Places API to get the coordinates for them. The interests are: {{interests}}. \
The keywords should be a list of strings. Output only the list and nothing else.";

/// Route sights -> riddle about the destination
pub const RIDDLE_TEMPLATE: &str = "You have a list of some notable points that lie in a path leading to some destination. \
Build a riddle that uses some of these points (the ones you think are best suited to be used) as clues to the destination. \
The riddle should be such that the answer to the riddle is the destination. \
Don't mention the destination name in the riddle. \
The start location is {{start}} and more importantly, the destination is {{destination}}. \
The notable points are as follows: {{#each sights}}{{#if @index}}, {{/if}}{{this}}{{/each}}. \
Only output the riddle and nothing else.";

/// Target details -> one sentence hint
pub const HINT_TEMPLATE: &str = "You are stuck at a location and need a hint to move forward. \
The hint should be a sentence that gives a clue about the destination. \
The target location which is also the destination is {{target}}. \
The details of the location are as follows: {{details}}. \
Output only the hint and nothing else.";

/// The full system prompt for the dispatching agent
pub fn game_master_prompt() -> String {
    format!("{}\n\n{}", GAME_MASTER_INSTRUCTIONS, GAME_MASTER_SITUATION)
}
