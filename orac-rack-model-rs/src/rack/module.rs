use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use super::page::Page;
use super::param::Param;

/// An instrument or effect occupying one rack slot.
///
/// Owns its pages and parameters; replacing the module in its slot drops
/// all of them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    /// Module type id, also the entry in the module resource list
    /// (e.g. `synth/brdsmono`).
    pub id: String,
    /// Display name of this instance.
    pub label: String,
    /// Pages in declaration order.
    pub pages: Vec<Page>,
    /// Declared parameters by id. Pages refer into this map.
    pub params: BTreeMap<String, Param>,
}

impl Module {
    /// Empty module; pages and parameters are declared afterwards.
    pub fn new(label: &str, id: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Append a page after those already declared.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Add a parameter, replacing any earlier declaration with the same id.
    pub fn add_param(&mut self, param: Param) {
        self.params.insert(param.id().into(), param);
    }

    /// Number of declared pages.
    pub fn page_len(&self) -> usize {
        self.pages.len()
    }

    /// Page at `index`, or `None` past the end.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Parameter by id, or `None` if it was never declared.
    pub fn param(&self, id: &str) -> Option<&Param> {
        self.params.get(id)
    }

    /// Mutable variant of [`param()`](Self::param).
    pub fn param_mut(&mut self, id: &str) -> Option<&mut Param> {
        self.params.get_mut(id)
    }

    /// Resolve the `index`-th parameter of page `page_index`.
    ///
    /// `None` if the page or index does not exist, or if the page refers to
    /// an undeclared parameter id.
    pub fn page_param(&self, page_index: usize, index: usize) -> Option<&Param> {
        let id = self.page(page_index)?.param_id(index)?;
        self.param(id)
    }

    /// Mutable variant of [`page_param()`](Self::page_param).
    pub fn page_param_mut(&mut self, page_index: usize, index: usize) -> Option<&mut Param> {
        let page = self.pages.get(page_index)?;
        let id = page.param_id(index)?;
        self.params.get_mut(id)
    }
}
