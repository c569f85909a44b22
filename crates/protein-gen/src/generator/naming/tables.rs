/// Maps a raw reference name to a canonical entity only when it appears inside `owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OwnerOverride {
  pub owner: &'static str,
  pub raw: &'static str,
  pub canonical: &'static str,
}

/// Field name that marks an entity as implementing an extra capability interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CapabilityField {
  pub field: &'static str,
  pub interface: &'static str,
}

/// Declarative naming policy consulted by [`super::NamingResolver`].
///
/// Lookup precedence is owner override, then exact alias, then the longest matching
/// prefix family. Names matched by none of them pass through unchanged.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NamingTable {
  pub owner_overrides: &'static [OwnerOverride],
  pub exact_aliases: &'static [(&'static str, &'static str)],
  pub prefix_families: &'static [(&'static str, &'static str)],
  pub link_denylist: &'static [&'static str],
  pub sync_only: &'static [&'static str],
  pub capability_fields: &'static [CapabilityField],
  pub base_fields: &'static [&'static str],
}

const fn owner(owner: &'static str, raw: &'static str, canonical: &'static str) -> OwnerOverride {
  OwnerOverride { owner, raw, canonical }
}

pub(crate) static STANDARD: NamingTable = NamingTable {
  owner_overrides: &[
    owner("ItemCategoryType", "Category", "ItemCategory"),
    owner("Item", "Category", "ItemCategory"),
    owner("Receipt", "Category", "ReceiptCategory"),
    owner("Order", "Status", "OrderStatus"),
    owner("Receipt", "Status", "ReceiptStatus"),
    owner("Order", "Type", "OrderType"),
    owner("Receipt", "Type", "ReceiptType"),
  ],
  exact_aliases: &[
    ("ContactPersonGroup", "PersonGroup"),
    ("PolicemanGroup", "PersonGroup"),
    ("GuarantorGroup", "PersonGroup"),
    ("ClerkGroup", "PersonGroup"),
    ("PersonGroup", "PersonGroup"),
  ],
  prefix_families: &[("ContactUnit", "ContactUnit"), ("Person", "Person")],
  link_denylist: &["PriceGroupTypes", "GroupTypes"],
  sync_only: &["SyncData"],
  capability_fields: &[
    CapabilityField {
      field: "isShared",
      interface: "SharedEntity",
    },
    CapabilityField {
      field: "isFavorite",
      interface: "FavoriteEntity",
    },
  ],
  base_fields: &["created", "modified", "isDeleted"],
};
