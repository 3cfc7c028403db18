//! Recipe editor draft state and submit-time validation.
//!
//! A [`RecipeDraft`] mirrors the editing form. Each line input is either a
//! reference to an existing catalog name or a new name typed inline; the
//! distinction only matters when the draft is validated into a [`SavePlan`],
//! which lists the inline names the catalog may need to create.

use std::fmt;

use super::{IngredientLine, Quantity, QuantityParseError, Recipe, RecipeContents, RecipeId};

mod service;

pub use service::RecipeEditorService;


/// How a line names its ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientChoice {
    /// An existing catalog name picked from the options list.
    Reference(String),
    /// A name typed inline that may not be catalogued yet.
    NewInline(String),
}

impl IngredientChoice {
    /// The name as currently entered.
    pub fn name(&self) -> &str {
        match self {
            Self::Reference(name) | Self::NewInline(name) => name,
        }
    }

    /// Whether the line is in inline-creation mode.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::NewInline(_))
    }
}

impl Default for IngredientChoice {
    fn default() -> Self {
        Self::Reference(String::new())
    }
}

/// One ingredient row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDraft {
    /// Ingredient name input.
    pub choice: IngredientChoice,
    /// Parsed amount; `None` when left blank.
    pub quantity: Option<Quantity>,
    /// Unit label, empty when not chosen.
    pub unit: String,
    /// Tombstone marker. Deleted rows stay in place for the session.
    pub deleted: bool,
}

impl LineDraft {
    /// Not deleted and naming something after trimming.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.choice.name().trim().is_empty()
    }

    fn to_line(&self) -> IngredientLine {
        IngredientLine {
            ingredient_name: self.choice.name().trim().to_owned(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            deleted: self.deleted,
        }
    }
}

impl From<&IngredientLine> for LineDraft {
    fn from(line: &IngredientLine) -> Self {
        Self {
            choice: IngredientChoice::Reference(line.ingredient_name.clone()),
            quantity: line.quantity,
            unit: line.unit.clone(),
            deleted: line.deleted,
        }
    }
}

/// Errors raised by per-line draft edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEditError {
    LineOutOfRange { index: usize },
    LineDeleted { index: usize },
    InvalidQuantity(QuantityParseError),
}

impl fmt::Display for DraftEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineOutOfRange { index } => write!(f, "line {index} does not exist"),
            Self::LineDeleted { index } => write!(f, "line {index} has been deleted"),
            Self::InvalidQuantity(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DraftEditError {}

/// Reasons a draft cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeValidationError {
    BlankName,
    NoActiveLines,
}

impl RecipeValidationError {
    /// Form field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::NoActiveLines => "lines",
        }
    }
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "recipe name must not be blank"),
            Self::NoActiveLines => write!(f, "recipe needs at least one ingredient"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

impl From<RecipeValidationError> for super::DomainError {
    fn from(err: RecipeValidationError) -> Self {
        Self::validation(err.field(), err.to_string())
    }
}

/// Outcome of validating a draft: what to write and which inline names the
/// catalog should consider creating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    /// Recipe being edited, `None` for a new recipe.
    pub editing: Option<RecipeId>,
    /// Content to persist.
    pub contents: RecipeContents,
    /// Trimmed names of active inline lines, in line order.
    pub new_ingredient_names: Vec<String>,
}

/// Editing form state for a new or existing recipe.
///
/// # Examples
/// ```
/// use recipe_companion::domain::RecipeDraft;
///
/// let mut draft = RecipeDraft::new();
/// draft.set_name("Pancakes");
/// let line = draft.add_line();
/// draft.start_new_ingredient(line).expect("line exists");
/// draft.rename_new_ingredient(line, "Buttermilk").expect("line exists");
/// draft.set_quantity(line, "250").expect("numeric");
/// draft.set_unit(line, "ml").expect("line exists");
///
/// let plan = draft.validate().expect("valid draft");
/// assert_eq!(plan.new_ingredient_names, vec!["Buttermilk".to_owned()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    editing: Option<RecipeId>,
    name: String,
    notes: String,
    lines: Vec<LineDraft>,
}

impl RecipeDraft {
    /// Empty draft for a new recipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from a stored recipe, tombstoned lines included.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            editing: Some(recipe.id),
            name: recipe.name.clone(),
            notes: recipe.notes.clone(),
            lines: recipe.lines.iter().map(LineDraft::from).collect(),
        }
    }

    /// Recipe under edit, if any.
    pub fn editing(&self) -> Option<RecipeId> {
        self.editing
    }

    /// Name input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Notes input.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Every line, tombstones included, in positional order.
    pub fn lines(&self) -> &[LineDraft] {
        &self.lines
    }

    /// Lines shown in the form with their positional index.
    pub fn visible_lines(&self) -> impl Iterator<Item = (usize, &LineDraft)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.deleted)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Append a blank reference line and return its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineDraft::default());
        self.lines.len() - 1
    }

    /// Point the line at an existing catalog name.
    pub fn choose_ingredient(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), DraftEditError> {
        self.line_mut(index)?.choice = IngredientChoice::Reference(name.into());
        Ok(())
    }

    /// Switch the line to inline creation with an empty name.
    pub fn start_new_ingredient(&mut self, index: usize) -> Result<(), DraftEditError> {
        self.line_mut(index)?.choice = IngredientChoice::NewInline(String::new());
        Ok(())
    }

    /// Update the inline name, switching the line to inline mode if needed.
    pub fn rename_new_ingredient(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), DraftEditError> {
        self.line_mut(index)?.choice = IngredientChoice::NewInline(name.into());
        Ok(())
    }

    /// Parse and store the quantity input. Blank text clears it.
    pub fn set_quantity(&mut self, index: usize, raw: &str) -> Result<(), DraftEditError> {
        let quantity = Quantity::parse_optional(raw).map_err(DraftEditError::InvalidQuantity)?;
        self.line_mut(index)?.quantity = quantity;
        Ok(())
    }

    pub fn set_unit(&mut self, index: usize, unit: impl Into<String>) -> Result<(), DraftEditError> {
        self.line_mut(index)?.unit = unit.into();
        Ok(())
    }

    /// Tombstone the line in place. There is no undelete.
    pub fn delete_line(&mut self, index: usize) -> Result<(), DraftEditError> {
        self.line_mut(index)?.deleted = true;
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut LineDraft, DraftEditError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(DraftEditError::LineOutOfRange { index })?;
        if line.deleted {
            return Err(DraftEditError::LineDeleted { index });
        }
        Ok(line)
    }

    /// Check the draft and build the content to write.
    ///
    /// New recipes keep only active lines. Edits of a stored recipe also keep
    /// tombstoned lines that still carry a name so positions survive; rows that
    /// never named anything are dropped either way.
    pub fn validate(&self) -> Result<SavePlan, RecipeValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::BlankName);
        }
        if !self.lines.iter().any(LineDraft::is_active) {
            return Err(RecipeValidationError::NoActiveLines);
        }

        let keep_tombstones = self.editing.is_some();
        let lines = self
            .lines
            .iter()
            .filter(|line| !line.choice.name().trim().is_empty())
            .filter(|line| !line.deleted || keep_tombstones)
            .map(LineDraft::to_line)
            .collect();
        let new_ingredient_names = self
            .lines
            .iter()
            .filter(|line| line.is_active() && line.choice.is_new())
            .map(|line| line.choice.name().trim().to_owned())
            .collect();

        Ok(SavePlan {
            editing: self.editing,
            contents: RecipeContents {
                name: name.to_owned(),
                lines,
                notes: self.notes.trim().to_owned(),
            },
            new_ingredient_names,
        })
    }
}
