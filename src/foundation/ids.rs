/// Handle to an element in a [`crate::Document`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u32);

/// Handle to a mounted section's controller instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

/// Handle to one registration (entrance, interaction, loop, timer) of an instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct BindingHandle {
    /// Owning instance.
    pub instance: InstanceId,
    /// Registration index, unique within the process.
    pub id: u32,
}
