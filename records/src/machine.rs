//! Machines, machine-token associations, applications and client components.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A machine as listed by a machine resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub resolver_name: String,
}

/// Query filter for `GET /machine/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineFilter {
    pub hostname: Option<String>,
    pub ip: Option<String>,
    pub id: Option<String>,
    pub resolver: Option<String>,
    /// Match the term against hostname, ip and id at once.
    pub any: Option<String>,
}

impl MachineFilter {
    /// Only machines of one resolver; what the `/machine/list?resolver=` view uses.
    #[must_use]
    pub fn for_resolver(resolver: Option<String>) -> Self {
        Self { resolver, ..Self::default() }
    }

    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        query_pairs(&[
            ("hostname", &self.hostname),
            ("ip", &self.ip),
            ("id", &self.id),
            ("resolver", &self.resolver),
            ("any", &self.any),
        ])
    }
}

/// A token attached to a machine for one application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineToken {
    /// Association id (`mtid`).
    pub id: i64,
    pub serial: String,
    pub application: String,
    pub machine_id: Option<String>,
    pub resolver: Option<String>,
    pub hostname: Option<String>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
}

impl MachineToken {
    /// The composite key `DELETE /machine/token/...` is addressed by.
    #[must_use]
    pub fn key(&self) -> MachineTokenKey {
        MachineTokenKey {
            serial: self.serial.clone(),
            application: self.application.clone(),
            mtid: self.id,
        }
    }
}

/// `GET /machine/token` answers either a bare list or a paginated object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MachineTokenPage {
    List(Vec<MachineToken>),
    Paged {
        tokens: Vec<MachineToken>,
        #[serde(default)]
        count: u64,
    },
}

impl MachineTokenPage {
    #[must_use]
    pub fn into_tokens(self) -> Vec<MachineToken> {
        match self {
            Self::List(tokens) | Self::Paged { tokens, .. } => tokens,
        }
    }
}

/// Query filter for `GET /machine/token`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineTokenFilter {
    pub serial: Option<String>,
    pub application: Option<String>,
    pub machineid: Option<String>,
    pub resolver: Option<String>,
    pub hostname: Option<String>,
}

impl MachineTokenFilter {
    /// Tokens of one machine.
    #[must_use]
    pub fn for_machine(machineid: &str, resolver: &str) -> Self {
        Self {
            machineid: Some(machineid.to_owned()),
            resolver: Some(resolver.to_owned()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        query_pairs(&[
            ("serial", &self.serial),
            ("application", &self.application),
            ("machineid", &self.machineid),
            ("resolver", &self.resolver),
            ("hostname", &self.hostname),
        ])
    }
}

/// `(serial, application, mtid)` identifying one association.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineTokenKey {
    pub serial: String,
    pub application: String,
    pub mtid: i64,
}

/// Body for `POST /machine/token`.
///
/// Application options (e.g. `user` for ssh, `count` for offline) are sent
/// as top-level fields next to the association keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachTokenParams {
    pub serial: String,
    pub application: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machineid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
}

/// Body for `POST /machine/tokenoption`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOptionParams {
    pub serial: String,
    pub application: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machineid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtid: Option<i64>,
    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
}

/// Option schema per machine application, as returned by `GET /application/`.
pub type ApplicationDefinitions = BTreeMap<String, Value>;

/// One client application seen by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEntry {
    pub hostname: Option<String>,
    pub ip: Option<String>,
    pub lastseen: Option<String>,
}

/// Clients grouped by client type (user agent family), from `GET /client/`.
pub type ClientTypes = BTreeMap<String, Vec<ClientEntry>>;

fn query_pairs(fields: &[(&str, &Option<String>)]) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| ((*name).to_owned(), v.to_owned()))
        })
        .collect()
}
