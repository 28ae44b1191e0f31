//! Prompt templates sent to the recipe and image models.

use crate::recipe::RecipeRequest;

/// The role the language model plays for every recipe request
pub const SYSTEM_BEHAVIOR: &str = "\
You are an experienced chef who is renowned for making popular and exquisite recipes from all around the world.
You are tasked with generating a recipe given the:
- Ingredients.
- Dietary preferences such as for example: vegetarian, gluten-free, low-carb, etc.
- The number of servings (to generate the appropriate amount of ingredients required to make the dish).

You are required to carefully analyse the above user input and return the required recipe content.
You do not provide an acknowledgement of the query.

NOTE:
It is very important that you take the dietary preferences into consideration and make sure that you do not include any ingredients that go against them.

Maintain a Concise and Humorous Tone: your responses should be easy to understand for a wide range of audiences. Don't make niche references, or use English that a native speaker would not understand. Make use of markdown and emojis to organize and make information engaging.
Present a recipe which has 3-7 steps and 4-10 ingredients. Remember people usually prefer shorter recipes.

Formatted as:

<A creative, engaging title with adjectives (not too long)>
**Ingredients**: <a bullet point list of ingredients with US measurements (per number of servings requested by user)>
**Instructions**: <step-by-step including the need to preheat ovens, or prepare materials>
**Health Information**: <a line or two about why this recipe promotes longevity>
";

/// Shown to the user in place of a recipe when generation fails
pub const ERROR_MESSAGE: &str = "Oops! Something went wrong. We're sorry, but our server is currently \
experiencing technical difficulties. Please try again later. If the issue persists, feel free to \
contact support for assistance. Thank you for your understanding.";

fn list(items: &[String]) -> String {
    items.join(", ")
}

/// The user message describing what to cook
pub fn user_message(request: &RecipeRequest) -> String {
    format!(
        "I am interested in making a {cuisines} recipe.
My dietary preferences are as follows: {preferences}.
I want the recipe to have the following ingredients: {ingredients}
The desired number of servings is = {servings}.

Please generate a recipe and provide a step-by-step instruction to go about making it.
Make sure to provide the right amount of serving size for each of the ingredients I desire to be present in the recipe.
Make sure the recipe sticks to my dietary preferences.
",
        cuisines = list(&request.cuisines),
        preferences = list(&request.preferences),
        ingredients = list(&request.ingredients),
        servings = request.servings,
    )
}

/// The prompt handed to the image model, built from the generated recipe
pub fn image_prompt(instructions: &str) -> String {
    format!(
        "You are an experienced artist that showcases extravagant images of recipes prepared by \
world-class chefs. Generate an image for the following recipe: {instructions}"
    )
}

/// The recipe as presented to the user and printed on the card: a line recapping the
/// request, followed by the model's instructions
pub fn summary(request: &RecipeRequest, instructions: &str) -> String {
    format!(
        "Here's the {} recipe for {} with {} preferences for {} servings. \n{instructions}",
        list(&request.cuisines),
        list(&request.ingredients),
        list(&request.preferences),
        request.servings,
    )
}
