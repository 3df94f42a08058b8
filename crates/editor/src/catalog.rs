//! Furniture catalog: the static set of placeable items.

use shared::{CatalogItem, Category, Color, Dimensions, ItemKind, LocalizedName, Vec3Data};

/// Immutable catalog, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

struct ItemSpec {
    id: &'static str,
    th: &'static str,
    en: &'static str,
    kind: ItemKind,
    category: Category,
    model: &'static str,
    has_model: bool,
    color: u32,
    size: [f64; 3],
    scale: f64,
}

const BUILTIN: &[ItemSpec] = &[
    // ── Bedroom ─────────────────────────────────────────────
    ItemSpec { id: "bed-01", th: "เตียง", en: "Bed", kind: ItemKind::Bed, category: Category::Bedroom, model: "models/furniture/bed.glb", has_model: true, color: 0x8B4513, size: [2.0, 0.6, 2.2], scale: 1.0 },
    ItemSpec { id: "desk-01", th: "โต๊ะทำงาน", en: "Desk", kind: ItemKind::Desk, category: Category::Bedroom, model: "models/furniture/desk.glb", has_model: false, color: 0xDEB887, size: [1.2, 0.8, 0.6], scale: 1.0 },
    ItemSpec { id: "chair-01", th: "เก้าอี้", en: "Chair", kind: ItemKind::Chair, category: Category::Bedroom, model: "models/furniture/chair.glb", has_model: true, color: 0x654321, size: [0.6, 1.0, 0.6], scale: 0.5 },
    ItemSpec { id: "wardrobe-01", th: "ตู้เสื้อผ้า", en: "Wardrobe", kind: ItemKind::Wardrobe, category: Category::Bedroom, model: "/models/furniture/wardrobe.glb", has_model: false, color: 0x8B4513, size: [1.5, 2.0, 0.6], scale: 1.0 },
    ItemSpec { id: "lamp-01", th: "โคมไฟ", en: "Lamp", kind: ItemKind::Lamp, category: Category::Bedroom, model: "/models/furniture/lamp.glb", has_model: false, color: 0xFFD700, size: [0.3, 1.5, 0.3], scale: 1.0 },
    // ── Living room ─────────────────────────────────────────
    ItemSpec { id: "sofa-01", th: "โซฟาโมเดิร์น", en: "Modern Sofa", kind: ItemKind::Sofa, category: Category::Living, model: "/models/furniture/sofa.glb", has_model: true, color: 0x4682B4, size: [2.5, 0.8, 1.0], scale: 1.0 },
    ItemSpec { id: "coffee-table-01", th: "โต๊ะกลาง", en: "Coffee Table", kind: ItemKind::Table, category: Category::Living, model: "/models/furniture/coffee_table.glb", has_model: false, color: 0x8B4513, size: [1.2, 0.4, 0.8], scale: 1.0 },
    ItemSpec { id: "tv-01", th: "ทีวี", en: "TV", kind: ItemKind::Tv, category: Category::Living, model: "/models/furniture/tv.glb", has_model: false, color: 0x000000, size: [1.5, 0.9, 0.1], scale: 1.0 },
    ItemSpec { id: "shelf-01", th: "ชั้นวางของ", en: "Shelf", kind: ItemKind::Shelf, category: Category::Living, model: "/models/furniture/shelf.glb", has_model: false, color: 0xDEB887, size: [1.0, 1.8, 0.3], scale: 1.0 },
    // ── Kitchen ─────────────────────────────────────────────
    ItemSpec { id: "counter-01", th: "เคาน์เตอร์", en: "Counter", kind: ItemKind::Counter, category: Category::Kitchen, model: "/models/furniture/counter.glb", has_model: false, color: 0xF5F5DC, size: [2.0, 0.9, 0.6], scale: 1.0 },
    ItemSpec { id: "fridge-01", th: "ตู้เย็น", en: "Refrigerator", kind: ItemKind::Fridge, category: Category::Kitchen, model: "/models/furniture/fridge.glb", has_model: false, color: 0xC0C0C0, size: [0.7, 1.8, 0.7], scale: 1.0 },
    ItemSpec { id: "stove-01", th: "เตา", en: "Stove", kind: ItemKind::Stove, category: Category::Kitchen, model: "/models/furniture/stove.glb", has_model: false, color: 0x696969, size: [0.6, 0.9, 0.6], scale: 1.0 },
    ItemSpec { id: "sink-01", th: "อ่างล้างจาน", en: "Sink", kind: ItemKind::Sink, category: Category::Kitchen, model: "/models/furniture/sink.glb", has_model: false, color: 0xC0C0C0, size: [0.8, 0.9, 0.5], scale: 1.0 },
    // ── Bathroom ────────────────────────────────────────────
    ItemSpec { id: "bathtub-01", th: "อ่างอาบน้ำ", en: "Bathtub", kind: ItemKind::Bathtub, category: Category::Bathroom, model: "/models/furniture/bathtub.glb", has_model: false, color: 0xFFFFFF, size: [1.7, 0.6, 0.8], scale: 1.0 },
    ItemSpec { id: "toilet-01", th: "ห้องน้ำ", en: "Toilet", kind: ItemKind::Toilet, category: Category::Bathroom, model: "/models/furniture/toilet.glb", has_model: false, color: 0xFFFFFF, size: [0.4, 0.8, 0.6], scale: 1.0 },
    ItemSpec { id: "basin-01", th: "อ่างล้างหน้า", en: "Basin", kind: ItemKind::Basin, category: Category::Bathroom, model: "/models/furniture/basin.glb", has_model: false, color: 0xFFFFFF, size: [0.6, 0.8, 0.4], scale: 1.0 },
    ItemSpec { id: "mirror-01", th: "กระจก", en: "Mirror", kind: ItemKind::Mirror, category: Category::Bathroom, model: "/models/furniture/mirror.glb", has_model: false, color: 0x87CEEB, size: [0.8, 1.2, 0.05], scale: 1.0 },
];

impl Catalog {
    /// The built-in furniture set.
    pub fn builtin() -> Self {
        let items = BUILTIN
            .iter()
            .map(|s| CatalogItem {
                id: s.id.to_string(),
                names: LocalizedName {
                    th: s.th.to_string(),
                    en: s.en.to_string(),
                },
                kind: s.kind,
                category: s.category,
                size: Dimensions::new(s.size[0], s.size[1], s.size[2]),
                color: Color(s.color),
                model_path: Some(s.model.to_string()),
                has_model: s.has_model,
                scale: Vec3Data::new(s.scale, s.scale, s.scale),
                rotation: Vec3Data::ZERO,
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Categories that have at least one item, in display order.
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| self.items.iter().any(|i| i.category == *c))
            .collect()
    }

    /// Lookup by any localized display name. Only used for scenes saved
    /// before catalog ids were persisted.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items
            .iter()
            .find(|i| i.names.th == name || i.names.en == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Locale;

    #[test]
    fn builtin_has_all_items() {
        let c = Catalog::builtin();
        assert_eq!(c.len(), 17);
        assert_eq!(c.categories().len(), 4);
        assert_eq!(c.by_category(Category::Kitchen).count(), 4);
    }

    #[test]
    fn bed_dimensions() {
        let c = Catalog::builtin();
        let bed = c.get("bed-01").unwrap();
        assert_eq!(bed.size, Dimensions::new(2.0, 0.6, 2.2));
        assert_eq!(bed.kind, ItemKind::Bed);
        assert_eq!(bed.asset_path(), Some("models/furniture/bed.glb"));
        assert_eq!(bed.display_name(Locale::En), "Bed");
    }

    #[test]
    fn items_without_model_have_no_asset_path() {
        let c = Catalog::builtin();
        assert!(c.get("desk-01").unwrap().asset_path().is_none());
    }

    #[test]
    fn find_by_either_name() {
        let c = Catalog::builtin();
        assert_eq!(c.find_by_name("เก้าอี้").unwrap().id, "chair-01");
        assert_eq!(c.find_by_name("Chair").unwrap().id, "chair-01");
        assert!(c.find_by_name("Hammock").is_none());
    }

    #[test]
    fn chair_default_scale() {
        let c = Catalog::builtin();
        assert_eq!(c.get("chair-01").unwrap().scale, Vec3Data::new(0.5, 0.5, 0.5));
    }
}
