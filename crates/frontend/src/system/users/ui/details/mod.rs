use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserRole};

use crate::shared::collection::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel};
use crate::shared::collection::ValidationErrors;

const MIN_PASSWORD_LEN: usize = 6;

fn roles() -> Vec<(&'static str, &'static str)> {
    UserRole::ALL.iter().map(|r| (r.as_str(), r.label())).collect()
}

fn check_email(r: &mut FieldReader<'_>, email: &Option<String>) {
    if let Some(email) = email {
        r.check("email", email.contains('@'), "Некорректный email");
    }
}

impl FormModel for User {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("username", "Логин", FieldKind::Text).required(),
            FieldSpec::new("password", "Пароль", FieldKind::Password)
                .required()
                .create_only(),
            FieldSpec::new("fullName", "ФИО", FieldKind::Text),
            FieldSpec::new("email", "Email", FieldKind::Text),
            FieldSpec::new("role", "Роль", FieldKind::Choice(roles)).required(),
            FieldSpec::new("isActive", "Активен", FieldKind::Checkbox).edit_only(),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::from_pairs([("role", UserRole::Operator.as_str())])
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("username", self.username.clone()),
            ("fullName", self.full_name.clone().unwrap_or_default()),
            ("email", self.email.clone().unwrap_or_default()),
            ("role", self.role.as_str().to_string()),
            ("isActive", self.is_active.to_string()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<CreateUserDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let role = r.required_choice("role", UserRole::parse);
        let dto = CreateUserDto {
            username: r.required_text("username"),
            password: r.required_text("password"),
            email: r.optional_text("email"),
            full_name: r.optional_text("fullName"),
            role: role.unwrap_or(UserRole::Viewer),
        };
        r.check(
            "password",
            dto.password.chars().count() >= MIN_PASSWORD_LEN,
            "Пароль не короче 6 символов",
        );
        check_email(&mut r, &dto.email);
        r.finish()?;
        Ok(dto)
    }

    fn to_update(draft: &FormDraft) -> Result<UpdateUserDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let role = r.required_choice("role", UserRole::parse);
        let dto = UpdateUserDto {
            email: r.optional_text("email"),
            full_name: r.optional_text("fullName"),
            role: role.unwrap_or(UserRole::Viewer),
            is_active: r.flag("isActive"),
        };
        check_email(&mut r, &dto.email);
        r.finish()?;
        Ok(dto)
    }

    fn locked_on_edit(&self) -> Vec<&'static str> {
        vec!["username"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_password() {
        let draft = FormDraft::from_pairs([("username", "kate"), ("password", "123"), ("role", "manager")]);
        let errors = User::to_create(&draft).unwrap_err();
        assert_eq!(errors.for_field("password"), Some("Пароль не короче 6 символов"));

        let draft = FormDraft::from_pairs([("username", "kate"), ("password", "secret1"), ("role", "manager")]);
        let dto = User::to_create(&draft).unwrap();
        assert_eq!(dto.role, UserRole::Manager);
        assert_eq!(dto.email, None);
    }

    #[test]
    fn test_update_reads_active_flag() {
        let draft = FormDraft::from_pairs([("role", "admin"), ("isActive", "false"), ("email", "ops@example.com")]);
        let dto = User::to_update(&draft).unwrap();
        assert!(!dto.is_active);
        assert_eq!(dto.email.as_deref(), Some("ops@example.com"));

        let bad = FormDraft::from_pairs([("role", "admin"), ("email", "nope")]);
        assert!(User::to_update(&bad).unwrap_err().for_field("email").is_some());
    }

    #[test]
    fn test_password_is_hidden_when_editing() {
        let visible: Vec<&str> = User::fields()
            .into_iter()
            .filter(|f| f.visible_in(true))
            .map(|f| f.name)
            .collect();
        assert!(!visible.contains(&"password"));
        assert!(visible.contains(&"isActive"));
    }
}
