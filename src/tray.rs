/// System tray icon with the overlay's context menu
///
/// Every leaf menu item maps to one overlay `Action`. Menu events are
/// delivered on a global channel and polled from the GUI thread.
use crate::overlay::Action;
use crate::palette::FontColor;
use crate::placement::Location;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_FILE: &str = "icon.png";
const ICON_SIZE: u32 = 16;

/// A submenu title and its items
pub type MenuGroup = (&'static str, Vec<(&'static str, Action)>);

/// Context menu layout, top to bottom. Exit is appended after a separator.
pub fn menu_groups() -> Vec<MenuGroup> {
    vec![
        (
            "移动到",
            Location::ALL
                .into_iter()
                .map(|loc| (loc.label(), Action::MoveTo(loc)))
                .collect(),
        ),
        (
            "透明度调整",
            vec![
                ("增加", Action::IncreaseOpacity),
                ("减少", Action::DecreaseOpacity),
            ],
        ),
        (
            "字体调整",
            vec![
                ("增大", Action::IncreaseFontSize),
                ("减小", Action::DecreaseFontSize),
                ("重置", Action::ResetFontSize),
            ],
        ),
        (
            "字体颜色调整",
            FontColor::ALL
                .into_iter()
                .map(|color| (color.label(), Action::SetColor(color)))
                .collect(),
        ),
        ("考试模式", vec![("开启", Action::EnableExamMode)]),
    ]
}

pub const EXIT_LABEL: &str = "退出";

/// Tooltip text for the current session state
pub fn tooltip(locked: bool, exam_mode: bool) -> String {
    let lock = if locked { "已锁定" } else { "可拖动" };
    if exam_mode {
        format!("Wosea Clock - {} - 考试模式", lock)
    } else {
        format!("Wosea Clock - {}", lock)
    }
}

/// Load the tray icon from icon.png, falling back to a plain square
fn load_app_icon() -> Result<Icon> {
    let paths_to_try = [
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.join(ICON_FILE))),
        Some(std::path::PathBuf::from(ICON_FILE)),
    ];

    for path in paths_to_try.into_iter().flatten() {
        if path.exists() {
            let icon_data = std::fs::read(&path)
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

            let img = image::load_from_memory(&icon_data)
                .map_err(|e| anyhow!("Failed to decode icon: {}", e))?;

            let img = img.resize_exact(ICON_SIZE, ICON_SIZE, image::imageops::FilterType::Lanczos3);
            let rgba = img.to_rgba8();

            return Icon::from_rgba(rgba.into_raw(), ICON_SIZE, ICON_SIZE)
                .map_err(|e| anyhow!("Failed to create icon from image: {:?}", e));
        }
    }

    tracing::debug!("{} not found, using fallback icon", ICON_FILE);
    let icon_rgba: Vec<u8> = (0..ICON_SIZE * ICON_SIZE)
        .flat_map(|_| [0x20, 0x20, 0x20, 0xFF])
        .collect();
    Icon::from_rgba(icon_rgba, ICON_SIZE, ICON_SIZE)
        .map_err(|e| anyhow!("Failed to create fallback icon: {:?}", e))
}

pub struct TrayManager {
    tray_icon: TrayIcon,
    actions: HashMap<MenuId, Action>,
}

impl TrayManager {
    /// Create the tray icon and its context menu
    pub fn new(locked: bool) -> Result<Self> {
        tracing::info!("Creating tray icon");

        let icon = load_app_icon()?;
        let menu = Menu::new();
        let mut actions = HashMap::new();

        for (title, items) in menu_groups() {
            let submenu = Submenu::new(title, true);
            for (label, action) in items {
                let item = MenuItem::new(label, true, None);
                submenu
                    .append(&item)
                    .map_err(|e| anyhow!("Failed to add {} item: {}", label, e))?;
                actions.insert(item.id().clone(), action);
            }
            menu.append(&submenu)
                .map_err(|e| anyhow!("Failed to add {} menu: {}", title, e))?;
        }

        let exit_item = MenuItem::new(EXIT_LABEL, true, None);
        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| anyhow!("Failed to add separator: {}", e))?;
        menu.append(&exit_item)
            .map_err(|e| anyhow!("Failed to add exit item: {}", e))?;
        actions.insert(exit_item.id().clone(), Action::Exit);

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(locked, false))
            .with_icon(icon)
            .with_menu(Box::new(menu))
            .build()
            .map_err(|e| anyhow!("Failed to create tray icon: {}", e))?;

        tracing::info!("Tray icon created with {} menu actions", actions.len());

        Ok(Self { tray_icon, actions })
    }

    /// Next pending menu action, if any
    pub fn poll(&self) -> Option<Action> {
        let event = MenuEvent::receiver().try_recv().ok()?;
        let action = self.actions.get(&event.id).copied();
        if action.is_none() {
            tracing::debug!("Ignoring unknown menu id {:?}", event.id);
        }
        action
    }

    pub fn set_status(&self, locked: bool, exam_mode: bool) {
        if let Err(e) = self.tray_icon.set_tooltip(Some(tooltip(locked, exam_mode))) {
            tracing::warn!("Failed to update tray tooltip: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_covers_every_action() {
        let actions: Vec<Action> = menu_groups()
            .into_iter()
            .flat_map(|(_, items)| items.into_iter().map(|(_, action)| action))
            .collect();

        assert_eq!(actions.len(), 5 + 2 + 3 + 9 + 1);
        for location in Location::ALL {
            assert!(actions.contains(&Action::MoveTo(location)));
        }
        for color in FontColor::ALL {
            assert!(actions.contains(&Action::SetColor(color)));
        }
        assert!(actions.contains(&Action::EnableExamMode));
        assert!(!actions.contains(&Action::Exit));
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(tooltip(true, false), "Wosea Clock - 已锁定");
        assert_eq!(tooltip(false, true), "Wosea Clock - 可拖动 - 考试模式");
    }
}
