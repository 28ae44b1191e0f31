//! Turning a [RecipeRequest] into recipe text and an illustration, via a [RecipeModel].

use crate::prompts;
use crate::recipe::RecipeRequest;
use crate::Error;
use log::{info, warn};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("the model returned no content")]
    EmptyResponse,

    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<GenerateError>,
    },
}

/// The language and image models recipes are generated with
pub trait RecipeModel {
    /// Send a system prompt and a user message, returning the model's text reply
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerateError>;

    /// Generate a picture from `prompt`, returning where it can be downloaded from
    fn illustrate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// A fixed number of attempts with a fixed pause in between
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds or the attempts run out
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, GenerateError>
    where
        F: FnMut() -> Result<T, GenerateError>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => {
                    return Err(GenerateError::Exhausted {
                        attempts,
                        last: Box::new(e),
                    })
                }
                Err(e) => {
                    warn!("{what} failed (attempt {attempt} of {attempts}): {e}, retrying");
                    std::thread::sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// A generated recipe
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecipe {
    /// The model's recipe text
    pub instructions: String,
    /// A recap of the request followed by the instructions; this is what goes on the card
    pub summary: String,
    /// Where the illustration can be downloaded from, if one could be generated
    pub image_url: Option<String>,
}

pub struct RecipeGenerator<M> {
    model: M,
    retry: RetryPolicy,
}

impl<M: RecipeModel> RecipeGenerator<M> {
    pub fn new(model: M, retry: RetryPolicy) -> RecipeGenerator<M> {
        RecipeGenerator { model, retry }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Generate the recipe text, then an illustration of it. Failing to get the text is an
    /// error; failing to get the picture only means there's no picture.
    pub fn generate(&self, request: &RecipeRequest) -> Result<GeneratedRecipe, Error> {
        request.validate()?;

        let message = prompts::user_message(request);
        let instructions = self.retry.run("recipe request", || {
            self.model.complete(prompts::SYSTEM_BEHAVIOR, &message)
        })?;
        info!("received recipe ({} characters)", instructions.len());

        let image_prompt = prompts::image_prompt(&instructions);
        let image_url = match self
            .retry
            .run("image request", || self.model.illustrate(&image_prompt))
        {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("continuing without a recipe image: {e}");
                None
            }
        };

        let summary = prompts::summary(request, &instructions);
        Ok(GeneratedRecipe {
            instructions,
            summary,
            image_url,
        })
    }
}

/// A canned model for tests and offline runs.
///
/// Replies with fixed text and a fixed URL. Each call first consumes any queued
/// failures for that kind of call. Every prompt received is recorded.
#[derive(Debug, Default)]
pub struct FakeModel {
    pub recipe: String,
    pub image_url: String,
    recipe_failures: RefCell<VecDeque<GenerateError>>,
    image_failures: RefCell<VecDeque<GenerateError>>,
    prompts: RefCell<Vec<String>>,
}

impl FakeModel {
    pub fn new<R: ToString, U: ToString>(recipe: R, image_url: U) -> FakeModel {
        FakeModel {
            recipe: recipe.to_string(),
            image_url: image_url.to_string(),
            ..Default::default()
        }
    }

    /// Make the next recipe request fail with `error`
    pub fn fail_recipe(self, error: GenerateError) -> FakeModel {
        self.recipe_failures.borrow_mut().push_back(error);
        self
    }

    /// Make the next image request fail with `error`
    pub fn fail_image(self, error: GenerateError) -> FakeModel {
        self.image_failures.borrow_mut().push_back(error);
        self
    }

    /// Every user message and image prompt received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl RecipeModel for FakeModel {
    fn complete(&self, _system: &str, user: &str) -> Result<String, GenerateError> {
        self.prompts.borrow_mut().push(user.to_string());
        match self.recipe_failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(self.recipe.clone()),
        }
    }

    fn illustrate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.image_failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(self.image_url.clone()),
        }
    }
}
