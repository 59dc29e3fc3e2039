use super::{FULLSCREEN_SHORTCUT, MenuTreeBuilder};
use crate::action::MenuAction;
use crate::ids;
use crate::model::{MenuItem, MenuNode, Submenu};
use crate::state::RuntimeState;

impl MenuTreeBuilder {
    pub(super) fn view_menu(&self, state: &RuntimeState) -> Submenu {
        let mut fullscreen = MenuItem::action(
            ids::FULLSCREEN,
            self.label("view.fullscreen"),
            MenuAction::ToggleFullScreen,
        );
        if let Some(shortcut) = FULLSCREEN_SHORTCUT.resolve(self.platform()) {
            fullscreen = fullscreen.accelerator(shortcut);
        }

        Submenu::new(
            ids::VIEW,
            self.label("view.label"),
            vec![
                fullscreen.into(),
                Submenu::new(
                    ids::LANGUAGES,
                    self.label("view.languages"),
                    self.language_items(state),
                )
                .into(),
            ],
        )
    }

    fn language_items(&self, state: &RuntimeState) -> Vec<MenuNode> {
        let system_default = self.translator.best_match(&self.config.system_locale);

        let mut items = vec![
            MenuItem::action(
                ids::LANGUAGE_DEFAULT,
                self.label("view.default"),
                MenuAction::SetLanguage(system_default),
            )
            .into(),
            MenuNode::Separator,
        ];

        items.extend(
            self.translator
                .languages()
                .into_iter()
                .filter(|code| !code.is_dev())
                .map(|code| {
                    MenuItem::action(
                        ids::language_id(&code),
                        self.label(&format!("view.langCodes.{code}")),
                        MenuAction::SetLanguage(code.clone()),
                    )
                    .checked(code == state.language)
                    .into()
                }),
        );

        items
    }
}
