use crate::{
    entity_id::EntityId,
    position::BlockPosition,
    protocol::packet::common::{AbilityFlags, Hand},
};
use minecraft_protocol_core_macros::{Decode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "serverbound")]
pub enum Packet {
    TeleportConfirm(TeleportConfirm),
    QueryBlockNbt(QueryBlockNbt),
    SetDifficulty(SetDifficulty),
    ChatMessage(ChatMessage),
    ClientStatus(ClientStatus),
    ClientSettings(ClientSettings),
    TabComplete(TabComplete),
    WindowConfirmation(WindowConfirmation),
    ClickWindowButton(ClickWindowButton),
    ClickWindow(ClickWindow),
    CloseWindow(CloseWindow),
    PluginMessage(PluginMessage),
    EditBook(EditBook),
    QueryEntityNbt(QueryEntityNbt),
    InteractEntity(InteractEntity),
    GenerateStructure(GenerateStructure),
    KeepAlive(KeepAlive),
    LockDifficulty(LockDifficulty),
    PlayerPosition(PlayerPosition),
    PlayerPositionAndRotation(PlayerPositionAndRotation),
    PlayerRotation(PlayerRotation),
    PlayerMovement(PlayerMovement),
    VehicleMove(VehicleMove),
    SteerBoat(SteerBoat),
    PickItem(PickItem),
    CraftRecipeRequest(CraftRecipeRequest),
    PlayerAbilities(PlayerAbilities),
    PlayerDigging(PlayerDigging),
    EntityAction(EntityAction),
    SteerVehicle(SteerVehicle),
    SetDisplayedRecipe(SetDisplayedRecipe),
    SetRecipeBookState(SetRecipeBookState),
    NameItem(NameItem),
    ResourcePackStatus(ResourcePackStatus),
    AdvancementTab(AdvancementTab),
    SelectTrade(SelectTrade),
    SetBeaconEffect(SetBeaconEffect),
    HeldItemChange(HeldItemChange),
    UpdateCommandBlock(UpdateCommandBlock),
    UpdateCommandBlockMinecart(UpdateCommandBlockMinecart),
    CreativeInventoryAction(CreativeInventoryAction),
    UpdateJigsawBlock(UpdateJigsawBlock),
    UpdateStructureBlock(UpdateStructureBlock),
    UpdateSign(UpdateSign),
    Animation(Animation),
    Spectate(Spectate),
    PlayerBlockPlacement(PlayerBlockPlacement),
    UseItem(UseItem),
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x00, phase = "play", direction = "serverbound")]
pub struct TeleportConfirm {
    #[encoding(varint)]
    pub teleport_id: i32,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x01, phase = "play", direction = "serverbound")]
pub struct QueryBlockNbt {
    #[encoding(varint)]
    pub transaction_id: i32,
    pub location: BlockPosition,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x02, phase = "play", direction = "serverbound")]
pub struct SetDifficulty {
    pub difficulty: u8,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x03, phase = "play", direction = "serverbound")]
pub struct ChatMessage {
    #[encoding(max_length = 256)]
    pub message: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x04, phase = "play", direction = "serverbound")]
pub struct ClientStatus {
    pub action: ClientStatusAction,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Decode)]
#[encoding(discriminant = "varint")]
pub enum ClientStatusAction {
    #[encoding(id = 0)]
    PerformRespawn,
    #[encoding(id = 1)]
    RequestStats,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x05, phase = "play", direction = "serverbound")]
pub struct ClientSettings {
    #[encoding(max_length = 16)]
    pub locale: String,
    pub view_distance: i8,
    #[encoding(varint)]
    pub chat_mode: i32,
    pub chat_colors: bool,
    pub displayed_skin_parts: u8,
    pub main_hand: Hand,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x06, phase = "play", direction = "serverbound")]
pub struct TabComplete {
    #[encoding(varint)]
    pub transaction_id: i32,
    #[encoding(max_length = 32500)]
    pub text: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x07, phase = "play", direction = "serverbound")]
pub struct WindowConfirmation {
    pub window_id: i8,
    pub action_number: i16,
    pub accepted: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x08, phase = "play", direction = "serverbound")]
pub struct ClickWindowButton {
    pub window_id: i8,
    pub button_id: i8,
}

/// The clicked item slot is kept undecoded.
#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x09, phase = "play", direction = "serverbound")]
pub struct ClickWindow {
    pub window_id: u8,
    pub slot: i16,
    pub button: i8,
    pub action_number: i16,
    #[encoding(varint)]
    pub mode: i32,
    #[encoding(length_prefix = "inferred")]
    pub clicked_item: Vec<u8>,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x0a, phase = "play", direction = "serverbound")]
pub struct CloseWindow {
    pub window_id: u8,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x0b, phase = "play", direction = "serverbound")]
pub struct PluginMessage {
    pub channel: String,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x0c, phase = "play", direction = "serverbound")]
pub struct EditBook {
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x0d, phase = "play", direction = "serverbound")]
pub struct QueryEntityNbt {
    #[encoding(varint)]
    pub transaction_id: i32,
    pub entity_id: EntityId,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x0e, phase = "play", direction = "serverbound")]
pub struct InteractEntity {
    pub entity_id: EntityId,
    pub action: InteractAction,
    pub sneaking: bool,
}

#[derive(Debug, Clone, PartialEq, Decode)]
#[encoding(discriminant = "varint")]
pub enum InteractAction {
    #[encoding(id = 0)]
    Interact { hand: Hand },
    #[encoding(id = 1)]
    Attack,
    #[encoding(id = 2)]
    InteractAt {
        target_x: f32,
        target_y: f32,
        target_z: f32,
        hand: Hand,
    },
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x0f, phase = "play", direction = "serverbound")]
pub struct GenerateStructure {
    pub location: BlockPosition,
    #[encoding(varint)]
    pub levels: i32,
    pub keep_jigsaws: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(
    id = 0x10,
    phase = "play",
    direction = "serverbound",
    before_authentication = true
)]
pub struct KeepAlive {
    pub keep_alive_id: i64,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x11, phase = "play", direction = "serverbound")]
pub struct LockDifficulty {
    pub locked: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x12, phase = "play", direction = "serverbound")]
pub struct PlayerPosition {
    pub x: f64,
    pub feet_y: f64,
    pub z: f64,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x13, phase = "play", direction = "serverbound")]
pub struct PlayerPositionAndRotation {
    pub x: f64,
    pub feet_y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x14, phase = "play", direction = "serverbound")]
pub struct PlayerRotation {
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x15, phase = "play", direction = "serverbound")]
pub struct PlayerMovement {
    pub on_ground: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x16, phase = "play", direction = "serverbound")]
pub struct VehicleMove {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x17, phase = "play", direction = "serverbound")]
pub struct SteerBoat {
    pub left_paddle_turning: bool,
    pub right_paddle_turning: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x18, phase = "play", direction = "serverbound")]
pub struct PickItem {
    #[encoding(varint)]
    pub slot_to_use: i32,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x19, phase = "play", direction = "serverbound")]
pub struct CraftRecipeRequest {
    pub window_id: i8,
    pub recipe: String,
    pub make_all: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x1a, phase = "play", direction = "serverbound")]
pub struct PlayerAbilities {
    pub flags: AbilityFlags,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x1b, phase = "play", direction = "serverbound")]
pub struct PlayerDigging {
    pub status: DiggingStatus,
    pub location: BlockPosition,
    pub face: i8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Decode)]
#[encoding(discriminant = "varint")]
pub enum DiggingStatus {
    #[encoding(id = 0)]
    Started,
    #[encoding(id = 1)]
    Cancelled,
    #[encoding(id = 2)]
    Finished,
    #[encoding(id = 3)]
    DropItemStack,
    #[encoding(id = 4)]
    DropItem,
    #[encoding(id = 5)]
    ReleaseUseItem,
    #[encoding(id = 6)]
    SwapItemInHand,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x1c, phase = "play", direction = "serverbound")]
pub struct EntityAction {
    pub entity_id: EntityId,
    #[encoding(varint)]
    pub action_id: i32,
    #[encoding(varint)]
    pub jump_boost: i32,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x1d, phase = "play", direction = "serverbound")]
pub struct SteerVehicle {
    pub sideways: f32,
    pub forward: f32,
    pub flags: u8,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x1e, phase = "play", direction = "serverbound")]
pub struct SetDisplayedRecipe {
    pub recipe_id: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x1f, phase = "play", direction = "serverbound")]
pub struct SetRecipeBookState {
    #[encoding(varint)]
    pub book_id: i32,
    pub book_open: bool,
    pub filter_active: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x20, phase = "play", direction = "serverbound")]
pub struct NameItem {
    pub item_name: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x21, phase = "play", direction = "serverbound")]
pub struct ResourcePackStatus {
    pub result: ResourcePackResult,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Decode)]
#[encoding(discriminant = "varint")]
pub enum ResourcePackResult {
    #[encoding(id = 0)]
    Loaded,
    #[encoding(id = 1)]
    Declined,
    #[encoding(id = 2)]
    Failed,
    #[encoding(id = 3)]
    Accepted,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x22, phase = "play", direction = "serverbound")]
pub struct AdvancementTab {
    pub action: AdvancementTabAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Decode)]
#[encoding(discriminant = "varint")]
pub enum AdvancementTabAction {
    #[encoding(id = 0)]
    OpenedTab { tab_id: String },
    #[encoding(id = 1)]
    ClosedScreen,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x23, phase = "play", direction = "serverbound")]
pub struct SelectTrade {
    #[encoding(varint)]
    pub selected_slot: i32,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x24, phase = "play", direction = "serverbound")]
pub struct SetBeaconEffect {
    #[encoding(varint)]
    pub primary_effect: i32,
    #[encoding(varint)]
    pub secondary_effect: i32,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x25, phase = "play", direction = "serverbound")]
pub struct HeldItemChange {
    pub slot: i16,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x26, phase = "play", direction = "serverbound")]
pub struct UpdateCommandBlock {
    pub location: BlockPosition,
    pub command: String,
    #[encoding(varint)]
    pub mode: i32,
    pub flags: i8,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x27, phase = "play", direction = "serverbound")]
pub struct UpdateCommandBlockMinecart {
    pub entity_id: EntityId,
    pub command: String,
    pub track_output: bool,
}

/// The item slot is kept undecoded.
#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x28, phase = "play", direction = "serverbound")]
pub struct CreativeInventoryAction {
    pub slot: i16,
    #[encoding(length_prefix = "inferred")]
    pub clicked_item: Vec<u8>,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x29, phase = "play", direction = "serverbound")]
pub struct UpdateJigsawBlock {
    pub location: BlockPosition,
    pub name: String,
    pub target: String,
    pub pool: String,
    pub final_state: String,
    pub joint_type: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x2a, phase = "play", direction = "serverbound")]
pub struct UpdateStructureBlock {
    pub location: BlockPosition,
    #[encoding(varint)]
    pub action: i32,
    #[encoding(varint)]
    pub mode: i32,
    pub name: String,
    pub offset_x: i8,
    pub offset_y: i8,
    pub offset_z: i8,
    pub size_x: i8,
    pub size_y: i8,
    pub size_z: i8,
    #[encoding(varint)]
    pub mirror: i32,
    #[encoding(varint)]
    pub rotation: i32,
    pub metadata: String,
    pub integrity: f32,
    #[encoding(varlong)]
    pub seed: i64,
    pub flags: i8,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x2b, phase = "play", direction = "serverbound")]
pub struct UpdateSign {
    pub location: BlockPosition,
    #[encoding(max_length = 384)]
    pub line_1: String,
    #[encoding(max_length = 384)]
    pub line_2: String,
    #[encoding(max_length = 384)]
    pub line_3: String,
    #[encoding(max_length = 384)]
    pub line_4: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x2c, phase = "play", direction = "serverbound")]
pub struct Animation {
    pub hand: Hand,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x2d, phase = "play", direction = "serverbound")]
pub struct Spectate {
    pub target_player: u128,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x2e, phase = "play", direction = "serverbound")]
pub struct PlayerBlockPlacement {
    pub hand: Hand,
    pub location: BlockPosition,
    #[encoding(varint)]
    pub face: i32,
    pub cursor_x: f32,
    pub cursor_y: f32,
    pub cursor_z: f32,
    pub inside_block: bool,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x2f, phase = "play", direction = "serverbound")]
pub struct UseItem {
    pub hand: Hand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Decode, Decoder, Encoder};

    #[test]
    fn decode_interact_at() {
        let mut bytes = Vec::new();
        let mut encoder = Encoder::new(&mut bytes);
        encoder.write_var_int(42);
        encoder.write_var_int(2);
        encoder.write_f32(0.5);
        encoder.write_f32(1.0);
        encoder.write_f32(-0.5);
        encoder.write_var_int(1);
        encoder.write_bool(true);

        let mut decoder = Decoder::new(&bytes);
        let packet = InteractEntity::decode(&mut decoder).unwrap();
        assert!(decoder.is_finished());
        assert_eq!(packet.entity_id, EntityId::new(42));
        assert_eq!(
            packet.action,
            InteractAction::InteractAt {
                target_x: 0.5,
                target_y: 1.0,
                target_z: -0.5,
                hand: Hand::Off,
            }
        );
        assert!(packet.sneaking);
    }

    #[test]
    fn decode_advancement_tab_actions() {
        let mut bytes = Vec::new();
        let mut encoder = Encoder::new(&mut bytes);
        encoder.write_var_int(0);
        encoder.write_string("minecraft:story/root").unwrap();
        let packet = AdvancementTab::decode(&mut Decoder::new(&bytes)).unwrap();
        assert_eq!(
            packet.action,
            AdvancementTabAction::OpenedTab {
                tab_id: "minecraft:story/root".to_owned()
            }
        );

        let packet = AdvancementTab::decode(&mut Decoder::new(&[1])).unwrap();
        assert_eq!(packet.action, AdvancementTabAction::ClosedScreen);
    }

    #[test]
    fn decode_player_digging() {
        let mut bytes = Vec::new();
        let mut encoder = Encoder::new(&mut bytes);
        encoder.write_var_int(2);
        encoder
            .write_block_position(BlockPosition::new(-5, 64, 12))
            .unwrap();
        encoder.write_i8(1);

        let packet = PlayerDigging::decode(&mut Decoder::new(&bytes)).unwrap();
        assert_eq!(packet.status, DiggingStatus::Finished);
        assert_eq!(packet.location, BlockPosition::new(-5, 64, 12));
        assert_eq!(packet.face, 1);
    }

    #[test]
    fn opaque_body_keeps_remaining_bytes() {
        let mut bytes = Vec::new();
        let mut encoder = Encoder::new(&mut bytes);
        encoder.write_string("minecraft:brand").unwrap();
        encoder.write_slice(b"vanilla");

        let packet = PluginMessage::decode(&mut Decoder::new(&bytes)).unwrap();
        assert_eq!(packet.channel, "minecraft:brand");
        assert_eq!(packet.data, b"vanilla");
    }

    #[test]
    fn keep_alive_is_allowed_before_authentication() {
        use crate::protocol::packet::Packet as _;
        assert!(KeepAlive::ALLOWED_BEFORE_AUTHENTICATION);
        assert!(!ChatMessage::ALLOWED_BEFORE_AUTHENTICATION);
    }
}
