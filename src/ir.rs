use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aka: Option<String>,
    #[serde(default)]
    pub in_photo: bool,
}

/// How a parent-child or auxiliary link is drawn. Never affects geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    #[default]
    Normal,
    Dashed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Family {
    #[serde(default)]
    pub partners: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub style: LinkStyle,
}

/// Declarative parent-to-children link consumed by the connection builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub style: LinkStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Single person to single person link, e.g. a godparent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxLinkSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub style: LinkStyle,
}

/// One curated row: an ordered list of units, each unit one or two person ids.
pub type CuratedRow = Vec<Vec<String>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub hidden: Vec<String>,
    #[serde(default)]
    pub links: Vec<AuxLinkSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<ConnectionSpec>>,
    #[serde(default)]
    pub rows: Vec<CuratedRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_person(&mut self, id: &str, name: &str, gender: Gender) -> &mut Person {
        self.people.push(Person {
            id: id.to_string(),
            name: name.to_string(),
            gender,
            aka: None,
            in_photo: false,
        });
        let last = self.people.len() - 1;
        &mut self.people[last]
    }

    pub fn add_family(&mut self, partners: &[&str], children: &[&str]) -> &mut Family {
        self.families.push(Family {
            partners: partners.iter().map(|id| id.to_string()).collect(),
            children: children.iter().map(|id| id.to_string()).collect(),
            note: None,
            style: LinkStyle::Normal,
        });
        let last = self.families.len() - 1;
        &mut self.families[last]
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    /// Explicit connection list when the dataset declares one, otherwise one
    /// spec per family in declaration order.
    pub fn connection_specs(&self) -> Vec<ConnectionSpec> {
        if let Some(connections) = &self.connections {
            return connections.clone();
        }
        self.families
            .iter()
            .map(|family| ConnectionSpec {
                parents: family.partners.clone(),
                children: family.children.clone(),
                style: family.style,
                note: family.note.clone(),
            })
            .collect()
    }
}
