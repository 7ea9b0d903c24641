use alloc::string::String;
use alloc::vec::Vec;

/// A named group of a module's parameters, in declaration order.
///
/// Pages hold parameter **ids**, not parameters. Resolution goes through the
/// owning [`Module`](super::Module); an id without a matching parameter
/// resolves to `None` and renders as a blank row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// Page id, unique within its module (e.g. `pg_osc`).
    pub id: String,
    /// Name shown by the page selector.
    pub label: String,
    /// Ids of the parameters shown on this page, top to bottom.
    pub param_ids: Vec<String>,
}

impl Page {
    /// Build a page from its declaration.
    pub fn new(id: &str, label: &str, param_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            param_ids,
        }
    }

    /// Number of parameter ids declared on this page.
    pub fn param_len(&self) -> usize {
        self.param_ids.len()
    }

    /// Parameter id at `index`, or `None` past the end.
    pub fn param_id(&self, index: usize) -> Option<&str> {
        self.param_ids.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn osc_page() -> Page {
        Page::new(
            "pg_osc",
            "Oscillator",
            vec!["o_shape".into(), "o_colour".into(), "o_timbre".into()],
        )
    }

    #[test]
    fn param_ids_keep_declaration_order() {
        let page = osc_page();
        assert_eq!(page.param_len(), 3);
        assert_eq!(page.param_id(0), Some("o_shape"));
        assert_eq!(page.param_id(1), Some("o_colour"));
        assert_eq!(page.param_id(2), Some("o_timbre"));
    }

    #[test]
    fn index_past_end_is_absent() {
        let page = osc_page();
        assert_eq!(page.param_id(3), None);
        assert_eq!(page.param_id(usize::MAX), None);
    }
}
