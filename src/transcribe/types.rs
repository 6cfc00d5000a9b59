//! Entity card data model

/// One database entity as described in the HTML fragment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityCard {
    /// Entity name (always present)
    pub title: String,
    /// Prose description, if the card carries one
    pub description: Option<String>,
    /// Attributes in document order (may be empty)
    pub attributes: Vec<Attribute>,
    /// Relationship list items in document order
    ///
    /// `None` when the card has no relationship list or the list has no
    /// child elements. `Some` may still hold zero items when the children
    /// are not `li`.
    pub relationships: Option<Vec<String>>,
}

/// One attribute row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribute {
    pub name: String,
    pub type_name: String,
    pub description: Option<String>,
}

impl EntityCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationships
            .get_or_insert_with(Vec::new)
            .push(relationship.into());
        self
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
