use crate::{
    foundation::error::{SlideError, SlideResult},
    model::element::TextElement,
};

/// Prefix of ids minted by [`Slide::add_text_element`].
pub const TEXT_ID_PREFIX: &str = "text-";

/// One background image plus an ordered collection of text elements.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Identifier, unique among the editor's slides.
    pub id: u64,
    /// Background image reference (relative path or `data:` URI).
    pub image_src: String,
    /// Text elements in insertion order.
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
    /// Counter used to mint `text-N` ids.
    #[serde(default = "default_next_text_id")]
    pub next_text_id: u64,
}

fn default_next_text_id() -> u64 {
    1
}

impl Slide {
    /// Create an empty slide.
    pub fn new(id: u64, image_src: impl Into<String>) -> Self {
        Self {
            id,
            image_src: image_src.into(),
            text_elements: Vec::new(),
            next_text_id: 1,
        }
    }

    /// Insert an element, minting an id when it has none.
    ///
    /// A supplied id advances the counter past its numeric suffix so later insertions never
    /// collide with it. Returns the element's id.
    pub fn add_text_element(&mut self, mut element: TextElement) -> SlideResult<String> {
        element.validate()?;
        if element.id.is_empty() {
            element.id = format!("{TEXT_ID_PREFIX}{}", self.next_text_id);
            self.next_text_id += 1;
        } else {
            if self.text_element(&element.id).is_some() {
                return Err(SlideError::validation(format!(
                    "slide {} already has a text element with id '{}'",
                    self.id, element.id
                )));
            }
            self.next_text_id = next_id([element.id.as_str()], self.next_text_id);
        }
        element.normalize();
        let id = element.id.clone();
        self.text_elements.push(element);
        Ok(id)
    }

    /// Insert a default "New Text" element at the slide center.
    pub fn add_text(&mut self) -> String {
        let id = format!("{TEXT_ID_PREFIX}{}", self.next_text_id);
        self.next_text_id += 1;
        let mut element = TextElement::default();
        element.id = id.clone();
        self.text_elements.push(element);
        id
    }

    /// Remove an element by id. Returns the removed element, if any.
    pub fn remove_text_element(&mut self, id: &str) -> Option<TextElement> {
        let idx = self.text_elements.iter().position(|el| el.id == id)?;
        Some(self.text_elements.remove(idx))
    }

    /// Lookup an element by id.
    pub fn text_element(&self, id: &str) -> Option<&TextElement> {
        self.text_elements.iter().find(|el| el.id == id)
    }

    /// Mutable lookup by id.
    pub fn text_element_mut(&mut self, id: &str) -> Option<&mut TextElement> {
        self.text_elements.iter_mut().find(|el| el.id == id)
    }

    /// Re-apply element invariants and repair the id counter after loading.
    pub fn normalize(&mut self) {
        for el in &mut self.text_elements {
            el.normalize();
        }
        let ids = self.text_elements.iter().map(|el| el.id.as_str());
        self.next_text_id = next_id(ids, self.next_text_id.max(1));
    }
}

/// Smallest counter value that is `>= current` and greater than every numeric `text-N` suffix.
///
/// Ids without a parsable numeric suffix are ignored.
pub fn next_id<'a>(existing: impl IntoIterator<Item = &'a str>, current: u64) -> u64 {
    existing
        .into_iter()
        .filter_map(id_suffix)
        .fold(current, |next, n| if n >= next { n.saturating_add(1) } else { next })
}

fn id_suffix(id: &str) -> Option<u64> {
    let part = id.split('-').nth(1)?;
    let digits_end = part
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(part.len(), |(i, _)| i);
    part[..digits_end].parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/model/slide.rs"]
mod tests;
