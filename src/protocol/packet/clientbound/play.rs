use crate::{
    entity_id::EntityId,
    position::BlockPosition,
    protocol::{
        packet::common::{AbilityFlags, Hand},
        Encode, EncodeError, Encoder,
    },
};
use minecraft_protocol_core_macros::{Encode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "clientbound")]
pub enum Packet {
    SpawnEntity(SpawnEntity),
    SpawnExperienceOrb(SpawnExperienceOrb),
    SpawnLivingEntity(SpawnLivingEntity),
    SpawnPainting(SpawnPainting),
    SpawnPlayer(SpawnPlayer),
    EntityAnimation(EntityAnimation),
    Statistics(Statistics),
    AcknowledgePlayerDigging(AcknowledgePlayerDigging),
    BlockBreakAnimation(BlockBreakAnimation),
    BlockEntityData(BlockEntityData),
    BlockAction(BlockAction),
    BlockChange(BlockChange),
    BossBar(BossBar),
    ServerDifficulty(ServerDifficulty),
    ChatMessage(ChatMessage),
    TabComplete(TabComplete),
    DeclareCommands(DeclareCommands),
    WindowConfirmation(WindowConfirmation),
    CloseWindow(CloseWindow),
    WindowItems(WindowItems),
    WindowProperty(WindowProperty),
    SetSlot(SetSlot),
    SetCooldown(SetCooldown),
    PluginMessage(PluginMessage),
    NamedSoundEffect(NamedSoundEffect),
    Disconnect(Disconnect),
    EntityStatus(EntityStatus),
    Explosion(Explosion),
    UnloadChunk(UnloadChunk),
    ChangeGameState(ChangeGameState),
    OpenHorseWindow(OpenHorseWindow),
    KeepAlive(KeepAlive),
    ChunkData(ChunkData),
    Effect(Effect),
    Particle(Particle),
    UpdateLight(UpdateLight),
    JoinGame(JoinGame),
    Map(Map),
    TradeList(TradeList),
    EntityPosition(EntityPosition),
    EntityPositionAndRotation(EntityPositionAndRotation),
    EntityRotation(EntityRotation),
    EntityMovement(EntityMovement),
    VehicleMove(VehicleMove),
    OpenBook(OpenBook),
    OpenWindow(OpenWindow),
    OpenSignEditor(OpenSignEditor),
    CraftRecipeResponse(CraftRecipeResponse),
    PlayerAbilities(PlayerAbilities),
    CombatEvent(CombatEvent),
    PlayerList(PlayerList),
    FacePlayer(FacePlayer),
    PlayerPositionAndLook(PlayerPositionAndLook),
    UnlockRecipes(UnlockRecipes),
    DestroyEntities(DestroyEntities),
    RemoveEntityEffect(RemoveEntityEffect),
    ResourcePackSend(ResourcePackSend),
    Respawn(Respawn),
    EntityHeadLook(EntityHeadLook),
    MultiBlockChange(MultiBlockChange),
    SelectAdvancementTab(SelectAdvancementTab),
    WorldBorder(WorldBorder),
    Camera(Camera),
    HeldItemChange(HeldItemChange),
    UpdateViewPosition(UpdateViewPosition),
    UpdateViewDistance(UpdateViewDistance),
    SpawnPosition(SpawnPosition),
    DisplayScoreboard(DisplayScoreboard),
    EntityMetadata(EntityMetadata),
    AttachEntity(AttachEntity),
    EntityVelocity(EntityVelocity),
    EntityEquipment(EntityEquipment),
    SetExperience(SetExperience),
    UpdateHealth(UpdateHealth),
    ScoreboardObjective(ScoreboardObjective),
    SetPassengers(SetPassengers),
    Teams(Teams),
    UpdateScore(UpdateScore),
    TimeUpdate(TimeUpdate),
    Title(Title),
    EntitySoundEffect(EntitySoundEffect),
    SoundEffect(SoundEffect),
    StopSound(StopSound),
    PlayerListHeaderAndFooter(PlayerListHeaderAndFooter),
    NbtQueryResponse(NbtQueryResponse),
    CollectItem(CollectItem),
    EntityTeleport(EntityTeleport),
    Advancements(Advancements),
    EntityProperties(EntityProperties),
    EntityEffect(EntityEffect),
    DeclareRecipes(DeclareRecipes),
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x00, phase = "play", direction = "clientbound")]
pub struct SpawnEntity {
    pub entity_id: EntityId,
    pub object_uuid: u128,
    #[encoding(varint)]
    pub entity_type: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[encoding(angle)]
    pub pitch: f32,
    #[encoding(angle)]
    pub yaw: f32,
    pub data: i32,
    pub velocity_x: i16,
    pub velocity_y: i16,
    pub velocity_z: i16,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x01, phase = "play", direction = "clientbound")]
pub struct SpawnExperienceOrb {
    pub entity_id: EntityId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub count: i16,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x02, phase = "play", direction = "clientbound")]
pub struct SpawnLivingEntity {
    pub entity_id: EntityId,
    pub entity_uuid: u128,
    #[encoding(varint)]
    pub entity_type: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[encoding(angle)]
    pub yaw: f32,
    #[encoding(angle)]
    pub pitch: f32,
    #[encoding(angle)]
    pub head_pitch: f32,
    pub velocity_x: i16,
    pub velocity_y: i16,
    pub velocity_z: i16,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x03, phase = "play", direction = "clientbound")]
pub struct SpawnPainting {
    pub entity_id: EntityId,
    pub entity_uuid: u128,
    #[encoding(varint)]
    pub motive: i32,
    pub location: BlockPosition,
    pub direction: u8,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x04, phase = "play", direction = "clientbound")]
pub struct SpawnPlayer {
    pub entity_id: EntityId,
    pub player_uuid: u128,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[encoding(angle)]
    pub yaw: f32,
    #[encoding(angle)]
    pub pitch: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x05, phase = "play", direction = "clientbound")]
pub struct EntityAnimation {
    pub entity_id: EntityId,
    pub animation: u8,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x06, phase = "play", direction = "clientbound")]
pub struct Statistics {
    #[encoding(length_prefix = "varint")]
    pub statistics: Vec<Statistic>,
}

#[derive(Debug, Clone, Encode)]
pub struct Statistic {
    #[encoding(varint)]
    pub category_id: i32,
    #[encoding(varint)]
    pub statistic_id: i32,
    #[encoding(varint)]
    pub value: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x07, phase = "play", direction = "clientbound")]
pub struct AcknowledgePlayerDigging {
    pub location: BlockPosition,
    #[encoding(varint)]
    pub block: i32,
    #[encoding(varint)]
    pub status: i32,
    pub successful: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x08, phase = "play", direction = "clientbound")]
pub struct BlockBreakAnimation {
    pub entity_id: EntityId,
    pub location: BlockPosition,
    pub destroy_stage: i8,
}

/// The NBT payload is kept undecoded.
#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x09, phase = "play", direction = "clientbound")]
pub struct BlockEntityData {
    pub location: BlockPosition,
    pub action: u8,
    #[encoding(length_prefix = "inferred")]
    pub nbt: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x0a, phase = "play", direction = "clientbound")]
pub struct BlockAction {
    pub location: BlockPosition,
    pub action_id: u8,
    pub action_param: u8,
    #[encoding(varint)]
    pub block_type: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x0b, phase = "play", direction = "clientbound")]
pub struct BlockChange {
    pub location: BlockPosition,
    #[encoding(varint)]
    pub block_id: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x0c, phase = "play", direction = "clientbound")]
pub struct BossBar {
    pub uuid: u128,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x0d, phase = "play", direction = "clientbound")]
pub struct ServerDifficulty {
    pub difficulty: u8,
    pub locked: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x0e, phase = "play", direction = "clientbound")]
pub struct ChatMessage {
    /// Chat component JSON.
    pub json_data: String,
    pub position: ChatPosition,
    pub sender: u128,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Encode)]
#[encoding(discriminant = "byte")]
pub enum ChatPosition {
    #[encoding(id = 0)]
    Chat,
    #[encoding(id = 1)]
    System,
    #[encoding(id = 2)]
    GameInfo,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x0f, phase = "play", direction = "clientbound")]
pub struct TabComplete {
    #[encoding(varint)]
    pub transaction_id: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x10, phase = "play", direction = "clientbound")]
pub struct DeclareCommands {
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x11, phase = "play", direction = "clientbound")]
pub struct WindowConfirmation {
    pub window_id: i8,
    pub action_number: i16,
    pub accepted: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x12, phase = "play", direction = "clientbound")]
pub struct CloseWindow {
    pub window_id: u8,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x13, phase = "play", direction = "clientbound")]
pub struct WindowItems {
    pub window_id: u8,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x14, phase = "play", direction = "clientbound")]
pub struct WindowProperty {
    pub window_id: u8,
    pub property: i16,
    pub value: i16,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x15, phase = "play", direction = "clientbound")]
pub struct SetSlot {
    pub window_id: i8,
    pub slot: i16,
    #[encoding(length_prefix = "inferred")]
    pub slot_data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x16, phase = "play", direction = "clientbound")]
pub struct SetCooldown {
    #[encoding(varint)]
    pub item_id: i32,
    #[encoding(varint)]
    pub cooldown_ticks: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x17, phase = "play", direction = "clientbound")]
pub struct PluginMessage {
    pub channel: String,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x18, phase = "play", direction = "clientbound")]
pub struct NamedSoundEffect {
    pub sound_name: String,
    #[encoding(varint)]
    pub sound_category: i32,
    /// Fixed-point, eight times the block coordinate.
    pub effect_position_x: i32,
    pub effect_position_y: i32,
    pub effect_position_z: i32,
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(
    id = 0x19,
    phase = "play",
    direction = "clientbound",
    before_authentication = true
)]
pub struct Disconnect {
    /// Chat component JSON.
    pub reason: String,
}

/// Carries a plain int entity id rather than a VarInt.
#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x1a, phase = "play", direction = "clientbound")]
pub struct EntityStatus {
    pub entity_id: i32,
    pub entity_status: i8,
}

#[derive(Debug, Clone, Packet)]
#[packet(id = 0x1b, phase = "play", direction = "clientbound")]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub strength: f32,
    /// Block offsets relative to the explosion center.
    pub records: Vec<ExplosionRecord>,
    pub player_motion_x: f32,
    pub player_motion_y: f32,
    pub player_motion_z: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Encode)]
pub struct ExplosionRecord {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

// The record count is an Int, which the derive has no option for.
impl Encode for Explosion {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.write_f32(self.x);
        encoder.write_f32(self.y);
        encoder.write_f32(self.z);
        encoder.write_f32(self.strength);
        encoder.write_i32(self.records.len().try_into()?);
        for record in &self.records {
            record.encode(encoder)?;
        }
        encoder.write_f32(self.player_motion_x);
        encoder.write_f32(self.player_motion_y);
        encoder.write_f32(self.player_motion_z);
        Ok(())
    }
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x1c, phase = "play", direction = "clientbound")]
pub struct UnloadChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x1d, phase = "play", direction = "clientbound")]
pub struct ChangeGameState {
    pub reason: u8,
    pub value: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x1e, phase = "play", direction = "clientbound")]
pub struct OpenHorseWindow {
    pub window_id: i8,
    #[encoding(varint)]
    pub number_of_slots: i32,
    pub entity_id: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(
    id = 0x1f,
    phase = "play",
    direction = "clientbound",
    before_authentication = true
)]
pub struct KeepAlive {
    pub keep_alive_id: i64,
}

/// Chunk sections, heightmaps and block entities are kept undecoded.
#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x20, phase = "play", direction = "clientbound")]
pub struct ChunkData {
    pub chunk_x: i32,
    pub chunk_z: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x21, phase = "play", direction = "clientbound")]
pub struct Effect {
    pub effect_id: i32,
    pub location: BlockPosition,
    pub data: i32,
    pub disable_relative_volume: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x22, phase = "play", direction = "clientbound")]
pub struct Particle {
    pub particle_id: i32,
    pub long_distance: bool,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub particle_data: f32,
    pub particle_count: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x23, phase = "play", direction = "clientbound")]
pub struct UpdateLight {
    #[encoding(varint)]
    pub chunk_x: i32,
    #[encoding(varint)]
    pub chunk_z: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

/// The dimension codec and everything after it is kept undecoded.
#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x24, phase = "play", direction = "clientbound")]
pub struct JoinGame {
    pub entity_id: i32,
    pub is_hardcore: bool,
    pub gamemode: u8,
    pub previous_gamemode: i8,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x25, phase = "play", direction = "clientbound")]
pub struct Map {
    #[encoding(varint)]
    pub map_id: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x26, phase = "play", direction = "clientbound")]
pub struct TradeList {
    #[encoding(varint)]
    pub window_id: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

/// Deltas are `(current * 32 - previous * 32) * 128`.
#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x27, phase = "play", direction = "clientbound")]
pub struct EntityPosition {
    pub entity_id: EntityId,
    pub delta_x: i16,
    pub delta_y: i16,
    pub delta_z: i16,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x28, phase = "play", direction = "clientbound")]
pub struct EntityPositionAndRotation {
    pub entity_id: EntityId,
    pub delta_x: i16,
    pub delta_y: i16,
    pub delta_z: i16,
    #[encoding(angle)]
    pub yaw: f32,
    #[encoding(angle)]
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x29, phase = "play", direction = "clientbound")]
pub struct EntityRotation {
    pub entity_id: EntityId,
    #[encoding(angle)]
    pub yaw: f32,
    #[encoding(angle)]
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x2a, phase = "play", direction = "clientbound")]
pub struct EntityMovement {
    pub entity_id: EntityId,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x2b, phase = "play", direction = "clientbound")]
pub struct VehicleMove {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x2c, phase = "play", direction = "clientbound")]
pub struct OpenBook {
    pub hand: Hand,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x2d, phase = "play", direction = "clientbound")]
pub struct OpenWindow {
    #[encoding(varint)]
    pub window_id: i32,
    #[encoding(varint)]
    pub window_type: i32,
    pub window_title: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x2e, phase = "play", direction = "clientbound")]
pub struct OpenSignEditor {
    pub location: BlockPosition,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x2f, phase = "play", direction = "clientbound")]
pub struct CraftRecipeResponse {
    pub window_id: i8,
    pub recipe: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x30, phase = "play", direction = "clientbound")]
pub struct PlayerAbilities {
    pub flags: AbilityFlags,
    pub flying_speed: f32,
    pub field_of_view_modifier: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x31, phase = "play", direction = "clientbound")]
pub struct CombatEvent {
    #[encoding(varint)]
    pub event: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x32, phase = "play", direction = "clientbound")]
pub struct PlayerList {
    #[encoding(varint)]
    pub action: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x33, phase = "play", direction = "clientbound")]
pub struct FacePlayer {
    #[encoding(varint)]
    pub feet_or_eyes: i32,
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x34, phase = "play", direction = "clientbound")]
pub struct PlayerPositionAndLook {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    /// Bit set of components that are relative.
    pub flags: i8,
    #[encoding(varint)]
    pub teleport_id: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x35, phase = "play", direction = "clientbound")]
pub struct UnlockRecipes {
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x36, phase = "play", direction = "clientbound")]
pub struct DestroyEntities {
    #[encoding(length_prefix = "varint")]
    pub entity_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x37, phase = "play", direction = "clientbound")]
pub struct RemoveEntityEffect {
    pub entity_id: EntityId,
    pub effect_id: i8,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x38, phase = "play", direction = "clientbound")]
pub struct ResourcePackSend {
    pub url: String,
    #[encoding(max_length = 40)]
    pub hash: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x39, phase = "play", direction = "clientbound")]
pub struct Respawn {
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x3a, phase = "play", direction = "clientbound")]
pub struct EntityHeadLook {
    pub entity_id: EntityId,
    #[encoding(angle)]
    pub head_yaw: f32,
}

/// Block changes within one 16x16x16 chunk section.
#[derive(Debug, Clone, Packet)]
#[packet(id = 0x3b, phase = "play", direction = "clientbound")]
pub struct MultiBlockChange {
    pub section_x: i32,
    pub section_y: i32,
    pub section_z: i32,
    pub trust_edges: bool,
    pub records: Vec<BlockChangeRecord>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BlockChangeRecord {
    pub block_state: i32,
    /// Coordinates within the section, each in `0..16`.
    pub local_x: u8,
    pub local_y: u8,
    pub local_z: u8,
}

impl BlockChangeRecord {
    fn pack(self) -> Result<i64, EncodeError> {
        for (axis, value) in [
            ('x', self.local_x),
            ('y', self.local_y),
            ('z', self.local_z),
        ] {
            if value >= 16 {
                return Err(EncodeError::CoordinateOutOfRange {
                    axis,
                    value: value.into(),
                    min: 0,
                    max: 15,
                });
            }
        }
        let local = (i64::from(self.local_x) << 8)
            | (i64::from(self.local_z) << 4)
            | i64::from(self.local_y);
        Ok((i64::from(self.block_state) << 12) | local)
    }
}

const SECTION_HORIZONTAL_BITS: u32 = 22;
const SECTION_VERTICAL_BITS: u32 = 20;

fn check_section_axis(axis: char, value: i32, bits: u32) -> Result<i64, EncodeError> {
    let min = -(1 << (bits - 1));
    let max = (1 << (bits - 1)) - 1;
    if !(min..=max).contains(&value) {
        return Err(EncodeError::CoordinateOutOfRange {
            axis,
            value,
            min,
            max,
        });
    }
    Ok(i64::from(value) & ((1 << bits) - 1))
}

impl MultiBlockChange {
    /// Packs the section coordinates as `[x: 22][z: 22][y: 20]`.
    pub fn packed_section(&self) -> Result<i64, EncodeError> {
        let x = check_section_axis('x', self.section_x, SECTION_HORIZONTAL_BITS)?;
        let y = check_section_axis('y', self.section_y, SECTION_VERTICAL_BITS)?;
        let z = check_section_axis('z', self.section_z, SECTION_HORIZONTAL_BITS)?;
        Ok((x << 42) | (z << 20) | y)
    }
}

impl Encode for MultiBlockChange {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.write_i64(self.packed_section()?);
        encoder.write_bool(self.trust_edges);
        encoder.write_var_int(self.records.len().try_into()?);
        for record in &self.records {
            encoder.write_var_long(record.pack()?);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x3c, phase = "play", direction = "clientbound")]
pub struct SelectAdvancementTab {
    #[encoding(bool_prefixed)]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x3d, phase = "play", direction = "clientbound")]
pub struct WorldBorder {
    #[encoding(varint)]
    pub action: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x3e, phase = "play", direction = "clientbound")]
pub struct Camera {
    pub camera_id: EntityId,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x3f, phase = "play", direction = "clientbound")]
pub struct HeldItemChange {
    pub slot: i8,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x40, phase = "play", direction = "clientbound")]
pub struct UpdateViewPosition {
    #[encoding(varint)]
    pub chunk_x: i32,
    #[encoding(varint)]
    pub chunk_z: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x41, phase = "play", direction = "clientbound")]
pub struct UpdateViewDistance {
    #[encoding(varint)]
    pub view_distance: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x42, phase = "play", direction = "clientbound")]
pub struct SpawnPosition {
    pub location: BlockPosition,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x43, phase = "play", direction = "clientbound")]
pub struct DisplayScoreboard {
    pub position: i8,
    #[encoding(max_length = 16)]
    pub score_name: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x44, phase = "play", direction = "clientbound")]
pub struct EntityMetadata {
    pub entity_id: EntityId,
    #[encoding(length_prefix = "inferred")]
    pub metadata: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x45, phase = "play", direction = "clientbound")]
pub struct AttachEntity {
    pub attached_entity_id: i32,
    pub holding_entity_id: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x46, phase = "play", direction = "clientbound")]
pub struct EntityVelocity {
    pub entity_id: EntityId,
    pub velocity_x: i16,
    pub velocity_y: i16,
    pub velocity_z: i16,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x47, phase = "play", direction = "clientbound")]
pub struct EntityEquipment {
    pub entity_id: EntityId,
    #[encoding(length_prefix = "inferred")]
    pub equipment: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x48, phase = "play", direction = "clientbound")]
pub struct SetExperience {
    pub experience_bar: f32,
    #[encoding(varint)]
    pub level: i32,
    #[encoding(varint)]
    pub total_experience: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x49, phase = "play", direction = "clientbound")]
pub struct UpdateHealth {
    pub health: f32,
    #[encoding(varint)]
    pub food: i32,
    pub food_saturation: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x4a, phase = "play", direction = "clientbound")]
pub struct ScoreboardObjective {
    #[encoding(max_length = 16)]
    pub objective_name: String,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x4b, phase = "play", direction = "clientbound")]
pub struct SetPassengers {
    pub entity_id: EntityId,
    #[encoding(length_prefix = "varint")]
    pub passengers: Vec<EntityId>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x4c, phase = "play", direction = "clientbound")]
pub struct Teams {
    #[encoding(max_length = 16)]
    pub team_name: String,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x4d, phase = "play", direction = "clientbound")]
pub struct UpdateScore {
    #[encoding(max_length = 40)]
    pub entity_name: String,
    pub action: i8,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x4e, phase = "play", direction = "clientbound")]
pub struct TimeUpdate {
    pub world_age: i64,
    pub time_of_day: i64,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x4f, phase = "play", direction = "clientbound")]
pub struct Title {
    #[encoding(varint)]
    pub action: i32,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x50, phase = "play", direction = "clientbound")]
pub struct EntitySoundEffect {
    #[encoding(varint)]
    pub sound_id: i32,
    #[encoding(varint)]
    pub sound_category: i32,
    pub entity_id: EntityId,
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x51, phase = "play", direction = "clientbound")]
pub struct SoundEffect {
    #[encoding(varint)]
    pub sound_id: i32,
    #[encoding(varint)]
    pub sound_category: i32,
    pub effect_position_x: i32,
    pub effect_position_y: i32,
    pub effect_position_z: i32,
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x52, phase = "play", direction = "clientbound")]
pub struct StopSound {
    pub flags: i8,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x53, phase = "play", direction = "clientbound")]
pub struct PlayerListHeaderAndFooter {
    pub header: String,
    pub footer: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x54, phase = "play", direction = "clientbound")]
pub struct NbtQueryResponse {
    #[encoding(varint)]
    pub transaction_id: i32,
    #[encoding(length_prefix = "inferred")]
    pub nbt: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x55, phase = "play", direction = "clientbound")]
pub struct CollectItem {
    pub collected_entity_id: EntityId,
    pub collector_entity_id: EntityId,
    #[encoding(varint)]
    pub pickup_item_count: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x56, phase = "play", direction = "clientbound")]
pub struct EntityTeleport {
    pub entity_id: EntityId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[encoding(angle)]
    pub yaw: f32,
    #[encoding(angle)]
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x57, phase = "play", direction = "clientbound")]
pub struct Advancements {
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x58, phase = "play", direction = "clientbound")]
pub struct EntityProperties {
    pub entity_id: EntityId,
    #[encoding(length_prefix = "inferred")]
    pub properties: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x59, phase = "play", direction = "clientbound")]
pub struct EntityEffect {
    pub entity_id: EntityId,
    pub effect_id: i8,
    pub amplifier: i8,
    #[encoding(varint)]
    pub duration: i32,
    pub flags: i8,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x5a, phase = "play", direction = "clientbound")]
pub struct DeclareRecipes {
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(packet: &impl Encode) -> Result<Vec<u8>, EncodeError> {
        let mut buffer = Vec::new();
        packet.encode(&mut Encoder::new(&mut buffer))?;
        Ok(buffer)
    }

    #[test]
    fn destroy_entities_uses_varints() {
        let packet = DestroyEntities {
            entity_ids: vec![EntityId::new(1), EntityId::new(300)],
        };
        assert_eq!(encode(&packet).unwrap(), [2, 1, 0xac, 0x02]);
    }

    #[test]
    fn entity_head_look_encodes_angle() {
        let packet = EntityHeadLook {
            entity_id: EntityId::new(7),
            head_yaw: 180.0,
        };
        assert_eq!(encode(&packet).unwrap(), [7, 128]);
    }

    #[test]
    fn chat_position_is_a_byte() {
        let packet = ChatMessage {
            json_data: "{}".to_owned(),
            position: ChatPosition::GameInfo,
            sender: 0,
        };
        let bytes = encode(&packet).unwrap();
        assert_eq!(&bytes[..4], [2, b'{', b'}', 2]);
        assert_eq!(bytes.len(), 4 + 16);
    }

    #[test]
    fn explosion_prefixes_records_with_int() {
        let packet = Explosion {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            strength: 1.0,
            records: vec![ExplosionRecord { x: -1, y: 0, z: 1 }],
            player_motion_x: 0.0,
            player_motion_y: 0.0,
            player_motion_z: 0.0,
        };
        let bytes = encode(&packet).unwrap();
        assert_eq!(&bytes[16..20], [0, 0, 0, 1]);
        assert_eq!(&bytes[20..23], [0xff, 0, 1]);
        assert_eq!(bytes.len(), 23 + 12);
    }

    #[test]
    fn multi_block_change_packs_records_as_varlongs() {
        let packet = MultiBlockChange {
            section_x: -1,
            section_y: 4,
            section_z: 2,
            trust_edges: false,
            records: vec![BlockChangeRecord {
                block_state: 1,
                local_x: 15,
                local_y: 0,
                local_z: 1,
            }],
        };
        let section = packet.packed_section().unwrap();
        assert_eq!(section >> 42, -1);
        assert_eq!((section >> 20) & 0x3f_ffff, 2);
        assert_eq!(section & 0xf_ffff, 4);

        let bytes = encode(&packet).unwrap();
        // (1 << 12) | (15 << 8) | (1 << 4) = 0x1f10
        assert_eq!(&bytes[8..], [0, 1, 0x90, 0x3e]);
    }

    #[test]
    fn multi_block_change_rejects_local_overflow() {
        let packet = MultiBlockChange {
            section_x: 0,
            section_y: 0,
            section_z: 0,
            trust_edges: true,
            records: vec![BlockChangeRecord {
                block_state: 1,
                local_x: 0,
                local_y: 16,
                local_z: 0,
            }],
        };
        assert!(matches!(
            encode(&packet),
            Err(EncodeError::CoordinateOutOfRange { axis: 'y', .. })
        ));
    }

    #[test]
    fn keep_alive_and_disconnect_pass_the_auth_guard() {
        use crate::protocol::packet::Packet as _;
        assert!(KeepAlive::ALLOWED_BEFORE_AUTHENTICATION);
        assert!(Disconnect::ALLOWED_BEFORE_AUTHENTICATION);
        assert!(!SpawnPlayer::ALLOWED_BEFORE_AUTHENTICATION);
    }
}
