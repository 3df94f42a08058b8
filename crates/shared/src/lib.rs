use serde::{Deserialize, Serialize};

/// Уникальный идентификатор объекта в сцене
pub type ObjectId = String;

/// Идентификатор проекта (миллисекунды с эпохи на момент создания)
pub type ProjectId = u64;

/// Тег, которым помечаются дескрипторы мебели в sceneData
pub const FURNITURE_TAG: &str = "furniture";

fn furniture_tag() -> String {
    FURNITURE_TAG.to_string()
}

// ============================================================================
// Базовые значения
// ============================================================================

/// Тройка чисел в формате хранения `{x, y, z}` (позиция, поворот в радианах, масштаб)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3Data {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3Data {
    pub const ZERO: Vec3Data = Vec3Data { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3Data = Vec3Data { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn one() -> Self {
        Self::ONE
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3Data {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Цвет RGB, сериализуется как `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const PLACEHOLDER: Color = Color(0xaaaaaa);

    /// Разбор строки вида `#8B4513` или `8B4513`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Color)
    }

    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0xffffff)
    }

    /// Компоненты в диапазоне 0..1 для рендера
    pub fn rgb_f32(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Габариты (ограничивающий параллелепипед) в метрах
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const UNIT: Dimensions = Dimensions {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };

    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Высота центра объекта, стоящего на полу
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }
}

// ============================================================================
// Каталог
// ============================================================================

/// Язык интерфейса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Th,
    En,
}

/// Название на каждом поддерживаемом языке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub th: String,
    pub en: String,
}

impl LocalizedName {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Th => &self.th,
            Locale::En => &self.en,
        }
    }
}

/// Вид мебели. Неизвестные строки превращаются в `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Bed,
    Desk,
    Chair,
    Wardrobe,
    Lamp,
    Sofa,
    Table,
    Tv,
    Shelf,
    Counter,
    Fridge,
    Stove,
    Sink,
    Bathtub,
    Toilet,
    Basin,
    Mirror,
    #[default]
    Unknown,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Bed => "bed",
            ItemKind::Desk => "desk",
            ItemKind::Chair => "chair",
            ItemKind::Wardrobe => "wardrobe",
            ItemKind::Lamp => "lamp",
            ItemKind::Sofa => "sofa",
            ItemKind::Table => "table",
            ItemKind::Tv => "tv",
            ItemKind::Shelf => "shelf",
            ItemKind::Counter => "counter",
            ItemKind::Fridge => "fridge",
            ItemKind::Stove => "stove",
            ItemKind::Sink => "sink",
            ItemKind::Bathtub => "bathtub",
            ItemKind::Toilet => "toilet",
            ItemKind::Basin => "basin",
            ItemKind::Mirror => "mirror",
            ItemKind::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "bed" => ItemKind::Bed,
            "desk" => ItemKind::Desk,
            "chair" => ItemKind::Chair,
            "wardrobe" => ItemKind::Wardrobe,
            "lamp" => ItemKind::Lamp,
            "sofa" => ItemKind::Sofa,
            "table" => ItemKind::Table,
            "tv" => ItemKind::Tv,
            "shelf" => ItemKind::Shelf,
            "counter" => ItemKind::Counter,
            "fridge" => ItemKind::Fridge,
            "stove" => ItemKind::Stove,
            "sink" => ItemKind::Sink,
            "bathtub" => ItemKind::Bathtub,
            "toilet" => ItemKind::Toilet,
            "basin" => ItemKind::Basin,
            "mirror" => ItemKind::Mirror,
            _ => ItemKind::Unknown,
        }
    }
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        ItemKind::parse(&s)
    }
}

impl From<ItemKind> for String {
    fn from(k: ItemKind) -> Self {
        k.as_str().to_string()
    }
}

/// Категория каталога (вкладка боковой панели)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bedroom,
    Living,
    Kitchen,
    Bathroom,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Bedroom,
            Category::Living,
            Category::Kitchen,
            Category::Bathroom,
        ]
    }
}

/// Неизменяемое описание размещаемого предмета мебели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub names: LocalizedName,
    pub kind: ItemKind,
    pub category: Category,
    pub size: Dimensions,
    pub color: Color,
    /// Путь к GLB-модели (может начинаться с `/`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    /// Есть ли для предмета реальная модель; иначе показывается коробка
    #[serde(default)]
    pub has_model: bool,
    #[serde(default = "Vec3Data::one")]
    pub scale: Vec3Data,
    /// Поворот по умолчанию в градусах
    #[serde(default)]
    pub rotation: Vec3Data,
}

impl CatalogItem {
    pub fn display_name(&self, locale: Locale) -> &str {
        self.names.get(locale)
    }

    /// Путь к модели, если её нужно загружать
    pub fn asset_path(&self) -> Option<&str> {
        if self.has_model {
            self.model_path.as_deref()
        } else {
            None
        }
    }
}

// ============================================================================
// Сцена и проект
// ============================================================================

/// Ссылка на предмет каталога в старом формате userData (`item.name`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyItemRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Семантические метаданные объекта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectUserData {
    #[serde(rename = "type", default = "furniture_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub is_fallback: bool,
    /// Присутствует только в сценах, сохранённых старой версией редактора
    #[serde(default, rename = "item", skip_serializing_if = "Option::is_none")]
    pub legacy_item: Option<LegacyItemRef>,
}

impl Default for ObjectUserData {
    fn default() -> Self {
        Self {
            tag: furniture_tag(),
            item_id: None,
            kind: ItemKind::Unknown,
            is_fallback: false,
            legacy_item: None,
        }
    }
}

/// Сериализованный размещённый объект (элемент sceneData и снимка истории)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObjectDescriptor {
    pub uuid: ObjectId,
    #[serde(rename = "type", default = "furniture_tag")]
    pub object_type: String,
    /// Стабильный id предмета каталога
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub position: Vec3Data,
    #[serde(default)]
    pub rotation: Vec3Data,
    #[serde(default = "Vec3Data::one")]
    pub scale: Vec3Data,
    #[serde(default)]
    pub user_data: ObjectUserData,
}

impl SceneObjectDescriptor {
    /// Id предмета каталога: сначала modelId, затем userData.itemId
    pub fn catalog_id(&self) -> Option<&str> {
        self.model_id
            .as_deref()
            .or(self.user_data.item_id.as_deref())
            .or_else(|| {
                self.user_data
                    .legacy_item
                    .as_ref()
                    .and_then(|i| i.id.as_deref())
            })
    }

    /// Имя для поиска по каталогу в старых сценах
    pub fn lookup_name(&self) -> Option<&str> {
        match &self.user_data.legacy_item {
            Some(item) if !item.name.is_empty() => Some(item.name.as_str()),
            _ if !self.name.is_empty() => Some(self.name.as_str()),
            _ => None,
        }
    }
}

/// Размер комнаты проекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    /// Сторона квадратной сетки пола в метрах
    pub fn grid_extent(&self) -> f64 {
        match self {
            SizeClass::Small => 6.0,
            SizeClass::Medium => 10.0,
            SizeClass::Large => 16.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

impl From<String> for SizeClass {
    fn from(s: String) -> Self {
        match s.as_str() {
            "small" => SizeClass::Small,
            "large" => SizeClass::Large,
            _ => SizeClass::Medium,
        }
    }
}

impl From<SizeClass> for String {
    fn from(s: SizeClass) -> Self {
        s.as_str().to_string()
    }
}

/// Сохраняемый проект
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub size: SizeClass,
    /// Дата создания `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub favorite: bool,
    /// RFC 3339, обновляется при каждом сохранении
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// CSS-градиент миниатюры в списке проектов
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub scene_data: Option<Vec<SceneObjectDescriptor>>,
}

impl Project {
    pub fn object_count(&self) -> usize {
        self.scene_data.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Запрос на создание проекта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub size: SizeClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#8B4513").unwrap();
        assert_eq!(c, Color(0x8b4513));
        assert_eq!(c.to_hex(), "#8B4513");
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn color_components() {
        let [r, g, b] = Color(0xff0000).rgb_f32();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn size_class_unknown_is_medium() {
        let s: SizeClass = serde_json::from_str("\"huge\"").unwrap();
        assert_eq!(s, SizeClass::Medium);
        let s: SizeClass = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(s.grid_extent(), 16.0);
    }

    #[test]
    fn item_kind_unknown_string() {
        let k: ItemKind = serde_json::from_str("\"hammock\"").unwrap();
        assert_eq!(k, ItemKind::Unknown);
        assert_eq!(serde_json::to_string(&ItemKind::Tv).unwrap(), "\"tv\"");
    }

    #[test]
    fn legacy_descriptor_parses() {
        let json = r#"{
            "uuid": "abc",
            "type": "furniture",
            "modelId": null,
            "name": "Unnamed Object",
            "position": {"x": 1.0, "y": 0.3, "z": -0.5},
            "rotation": {"x": 0, "y": 1.57, "z": 0},
            "scale": {"x": 1, "y": 1, "z": 1},
            "userData": {"type": "furniture", "selected": false, "outline": null,
                         "item": {"id": "bed-01", "name": "เตียง"}}
        }"#;
        let d: SceneObjectDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.catalog_id(), Some("bed-01"));
        assert_eq!(d.lookup_name(), Some("เตียง"));
        assert_eq!(d.position, Vec3Data::new(1.0, 0.3, -0.5));
    }

    #[test]
    fn project_minimal_record() {
        // Records created by the project list have no scene yet
        let json = r#"{"id": 1700000000000, "name": "Room", "size": "small", "date": "2024-01-01",
                       "color": "linear-gradient(45deg, #667eea, #764ba2)"}"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.size, SizeClass::Small);
        assert!(!p.favorite);
        assert_eq!(p.object_count(), 0);
    }
}
