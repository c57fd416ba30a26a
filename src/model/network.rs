//! Per-network marketplace link templates.
//!
//! Templates are plain URLs with `{address}`, `{id}` and `{chain_id}`
//! placeholders. The first template of a network doubles as the link behind the
//! token label.

use super::item::Item;
use std::collections::HashMap;

/// One outbound link affordance, e.g. "OpenSea".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    title: String,
    url: String,
}

impl LinkTemplate {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Expand the template for an item on the given chain.
    pub fn url_for(&self, item: &Item, chain_id: u64) -> String {
        self.url
            .replace("{address}", item.address().as_str())
            .replace("{id}", item.id().as_str())
            .replace("{chain_id}", &chain_id.to_string())
    }
}

/// Link templates keyed by chain id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLinks {
    by_chain: HashMap<u64, Vec<LinkTemplate>>,
}

impl NetworkLinks {
    /// No templates for any chain.
    pub fn empty() -> Self {
        Self {
            by_chain: HashMap::new(),
        }
    }

    /// Replace the templates for one chain.
    pub fn set(&mut self, chain_id: u64, templates: Vec<LinkTemplate>) {
        self.by_chain.insert(chain_id, templates);
    }

    /// Templates for a chain; empty when the chain has none.
    pub fn for_chain(&self, chain_id: u64) -> &[LinkTemplate] {
        self.by_chain
            .get(&chain_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for NetworkLinks {
    fn default() -> Self {
        let mut links = Self::empty();
        links.set(
            1,
            vec![
                LinkTemplate::new("OpenSea", "https://opensea.io/assets/ethereum/{address}/{id}"),
                LinkTemplate::new("Blur", "https://blur.io/asset/{address}/{id}"),
            ],
        );
        links.set(
            5,
            vec![LinkTemplate::new(
                "OpenSea",
                "https://testnets.opensea.io/assets/goerli/{address}/{id}",
            )],
        );
        links.set(
            137,
            vec![LinkTemplate::new(
                "OpenSea",
                "https://opensea.io/assets/matic/{address}/{id}",
            )],
        );
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContractAddress, TokenId};

    fn item() -> Item {
        Item::new(
            ContractAddress::new("0xabc").unwrap(),
            TokenId::new("42").unwrap(),
            "Kitties",
            "CK",
        )
    }

    #[test]
    fn template_expands_placeholders() {
        let t = LinkTemplate::new("X", "https://x/{chain_id}/{address}/{id}");
        assert_eq!(t.url_for(&item(), 10), "https://x/10/0xabc/42");
    }

    #[test]
    fn mainnet_has_opensea_then_blur() {
        let links = NetworkLinks::default();
        let titles: Vec<&str> = links.for_chain(1).iter().map(LinkTemplate::title).collect();
        assert_eq!(titles, vec!["OpenSea", "Blur"]);
    }

    #[test]
    fn unknown_chain_has_no_links() {
        assert!(NetworkLinks::default().for_chain(424242).is_empty());
    }

    #[test]
    fn set_replaces_chain_templates() {
        let mut links = NetworkLinks::default();
        links.set(1, vec![LinkTemplate::new("Mine", "https://mine/{id}")]);
        assert_eq!(links.for_chain(1).len(), 1);
        assert_eq!(links.for_chain(1)[0].url_for(&item(), 1), "https://mine/42");
    }
}
