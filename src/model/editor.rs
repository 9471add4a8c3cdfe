use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{SlideError, SlideResult},
    model::{
        element::{Corner, TextElement, TextUpdate},
        slide::Slide,
    },
};

/// Editor state: the ordered slides plus the current selection.
///
/// This is the persisted record (`{slides, currentSlideIndex, nextSlideId}`). The selected text
/// element is session-only and never serialized.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
    /// Index of the displayed slide.
    #[serde(default)]
    pub current_slide_index: usize,
    /// Counter used to mint slide ids.
    #[serde(default = "default_next_slide_id")]
    pub next_slide_id: u64,
    #[serde(skip)]
    selected_text_id: Option<String>,
}

fn default_next_slide_id() -> u64 {
    3
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_images(["assets/slide1.jpg", "assets/slide2.jpg"])
    }
}

impl EditorState {
    /// Build an editor with one empty slide per background image, ids starting at 1.
    pub fn with_images<I, S>(image_srcs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slides: Vec<Slide> = image_srcs
            .into_iter()
            .zip(1u64..)
            .map(|(src, id)| Slide::new(id, src))
            .collect();
        let next_slide_id = slides.len() as u64 + 1;
        Self {
            slides,
            current_slide_index: 0,
            next_slide_id,
            selected_text_id: None,
        }
    }

    /// Parse a persisted record, applying load-time defaults and invariants.
    pub fn from_json_str(s: &str) -> SlideResult<Self> {
        let mut state: Self = serde_json::from_str(s)?;
        state.normalize()?;
        Ok(state)
    }

    /// Serialize to the persisted record.
    pub fn to_json_string(&self) -> SlideResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a persisted record from disk.
    pub fn load(path: &Path) -> SlideResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read editor document '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Write the persisted record to disk.
    pub fn save(&self, path: &Path) -> SlideResult<()> {
        let s = self.to_json_string()?;
        std::fs::write(path, s)
            .with_context(|| format!("write editor document '{}'", path.display()))?;
        Ok(())
    }

    fn normalize(&mut self) -> SlideResult<()> {
        if self.slides.is_empty() {
            return Err(SlideError::validation(
                "editor document must contain at least one slide",
            ));
        }
        for slide in &mut self.slides {
            for el in &slide.text_elements {
                el.validate()?;
            }
            slide.normalize();
        }
        if self.current_slide_index >= self.slides.len() {
            self.current_slide_index = self.slides.len() - 1;
        }
        let max_id = self.slides.iter().map(|s| s.id).max().unwrap_or(0);
        self.next_slide_id = self.next_slide_id.max(max_id.saturating_add(1));
        self.selected_text_id = None;
        Ok(())
    }

    /// The displayed slide.
    pub fn current_slide(&self) -> SlideResult<&Slide> {
        self.slides.get(self.current_slide_index).ok_or_else(|| {
            SlideError::precondition(format!(
                "current slide index {} out of range ({} slides)",
                self.current_slide_index,
                self.slides.len()
            ))
        })
    }

    /// Mutable access to the displayed slide.
    pub fn current_slide_mut(&mut self) -> SlideResult<&mut Slide> {
        let len = self.slides.len();
        let idx = self.current_slide_index;
        self.slides.get_mut(idx).ok_or_else(|| {
            SlideError::precondition(format!(
                "current slide index {idx} out of range ({len} slides)"
            ))
        })
    }

    /// Display another slide. Out-of-range indices are ignored. Clears the selection.
    pub fn switch_to_slide(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.current_slide_index = index;
        self.selected_text_id = None;
        true
    }

    /// Append a slide for `image_src`, display it and return its id.
    pub fn add_slide(&mut self, image_src: impl Into<String>) -> u64 {
        let id = self.next_slide_id;
        self.next_slide_id += 1;
        self.slides.push(Slide::new(id, image_src));
        self.current_slide_index = self.slides.len() - 1;
        self.selected_text_id = None;
        id
    }

    /// Delete the slide at `index`. The last remaining slide cannot be deleted.
    pub fn delete_slide(&mut self, index: usize) -> SlideResult<Slide> {
        if self.slides.len() <= 1 {
            return Err(SlideError::precondition("cannot delete the last slide"));
        }
        if index >= self.slides.len() {
            return Err(SlideError::validation(format!(
                "slide index {index} out of range ({} slides)",
                self.slides.len()
            )));
        }
        let removed = self.slides.remove(index);
        if self.current_slide_index >= self.slides.len() {
            self.current_slide_index = self.slides.len() - 1;
        }
        self.selected_text_id = None;
        Ok(removed)
    }

    /// Id of the selected text element on the current slide, if any.
    pub fn selected_text_id(&self) -> Option<&str> {
        self.selected_text_id.as_deref()
    }

    /// Select a text element of the current slide (or clear the selection with `None`).
    pub fn select_text(&mut self, id: Option<&str>) -> SlideResult<()> {
        match id {
            None => self.selected_text_id = None,
            Some(id) => {
                if self.current_slide()?.text_element(id).is_none() {
                    return Err(SlideError::validation(format!(
                        "no text element '{id}' on the current slide"
                    )));
                }
                self.selected_text_id = Some(id.to_string());
            }
        }
        Ok(())
    }

    /// Add a default text element to the current slide and select it.
    pub fn add_text(&mut self) -> SlideResult<String> {
        let id = self.current_slide_mut()?.add_text();
        self.selected_text_id = Some(id.clone());
        Ok(id)
    }

    /// Delete the selected text element. Returns it when something was selected.
    pub fn delete_selected_text(&mut self) -> SlideResult<Option<TextElement>> {
        let Some(id) = self.selected_text_id.take() else {
            return Ok(None);
        };
        Ok(self.current_slide_mut()?.remove_text_element(&id))
    }

    /// Mutable access to the selected element; `None` when nothing is selected.
    pub fn selected_text_mut(&mut self) -> SlideResult<Option<&mut TextElement>> {
        let Some(id) = self.selected_text_id.clone() else {
            return Ok(None);
        };
        Ok(self.current_slide_mut()?.text_element_mut(&id))
    }

    /// Apply a typed update to the selection. No-op without a selection.
    pub fn update_selected(&mut self, update: TextUpdate) -> SlideResult<bool> {
        match self.selected_text_mut()? {
            Some(el) => {
                el.apply(update)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run `f` against the selection. No-op without a selection.
    pub fn with_selected(&mut self, f: impl FnOnce(&mut TextElement)) -> SlideResult<bool> {
        match self.selected_text_mut()? {
            Some(el) => {
                f(el);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move the selection to a corner.
    pub fn place_selected_at_corner(&mut self, corner: Corner) -> SlideResult<bool> {
        self.with_selected(|el| el.place_at_corner(corner))
    }

    /// Raise or lower the selection's paint order.
    pub fn adjust_selected_z_order(&mut self, direction: i32) -> SlideResult<bool> {
        self.with_selected(|el| el.adjust_z_order(direction))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/editor.rs"]
mod tests;
