use shared::Locale;

/// Translate a key into the given locale. Unknown keys return an empty string.
pub fn t(locale: Locale, key: &str) -> &'static str {
    let th = locale == Locale::Th;
    match key {
        // ── History ─────────────────────────────────────────
        "history.undo" => if th { "ย้อนกลับ" } else { "Undo" },
        "history.redo" => if th { "ทำซ้ำ" } else { "Redo" },

        // ── Editing ─────────────────────────────────────────
        "edit.deleted" => if th { "ลบแล้ว" } else { "Deleted" },
        "edit.copied" => if th { "คัดลอกแล้ว" } else { "Copied" },
        "edit.pasted" => if th { "วางแล้ว" } else { "Pasted" },

        // ── Assets ──────────────────────────────────────────
        "asset.loading" => if th { "กำลังโหลดโมเดล..." } else { "Loading model..." },
        "asset.added" => if th { "เพิ่มเฟอร์นิเจอร์แล้ว" } else { "Furniture added" },
        "asset.fallback" => if th {
            "ไม่สามารถโหลดโมเดล 3D ได้ จะแสดงเป็นกล่องแทน"
        } else {
            "Could not load 3D model. Showing box instead."
        },

        // ── Project ─────────────────────────────────────────
        "project.saved" => if th { "บันทึกโปรเจกต์เรียบร้อยแล้ว" } else { "Project saved successfully" },
        "project.unsaved" => if th {
            "คุณมีการเปลี่ยนแปลงที่ยังไม่ได้บันทึก หากคุณออกจากหน้านี้ การเปลี่ยนแปลงทั้งหมดจะหายไป"
        } else {
            "You have unsaved changes. If you leave this page, all changes will be lost."
        },
        "project.favorite_on" => if th { "เพิ่มในรายการโปรดแล้ว" } else { "Added to favorites" },
        "project.favorite_off" => if th { "นำออกจากรายการโปรดแล้ว" } else { "Removed from favorites" },

        // ── Views ───────────────────────────────────────────
        "view.reset" => if th { "รีเซ็ตมุมมอง" } else { "Reset View" },
        "view.isometric" => if th { "มุมมองไอโซเมตริก" } else { "Isometric View" },
        "view.top" => if th { "มุมมองด้านบน" } else { "Top View" },
        "view.front" => if th { "มุมมองด้านหน้า (ใต้)" } else { "Front View (South)" },
        "view.back" => if th { "มุมมองด้านหลัง (เหนือ)" } else { "Back View (North)" },
        "view.right" => if th { "มุมมองด้านข้าง (ตะวันออก)" } else { "Side View (East)" },
        "view.left" => if th { "มุมมองด้านข้าง (ตะวันตก)" } else { "Side View (West)" },

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_both_locales() {
        assert_eq!(t(Locale::En, "history.undo"), "Undo");
        assert_eq!(t(Locale::Th, "history.undo"), "ย้อนกลับ");
    }

    #[test]
    fn unknown_key_is_empty() {
        assert_eq!(t(Locale::En, "nope"), "");
    }
}
