//! Состояние модальной формы создания/редактирования.

/// Режим формы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

/// `Closed → Open → Submitting → Closed` on success, back to `Open` with the
/// error on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalForm {
    phase: FormPhase,
    error: Option<String>,
}

impl ModalForm {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self.phase {
            FormPhase::Closed => None,
            FormPhase::Open(mode) | FormPhase::Submitting(mode) => Some(mode),
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting(_))
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode(), Some(FormMode::Edit(_)))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open_create(&mut self) -> bool {
        self.open(FormMode::Create)
    }

    pub fn open_edit(&mut self, id: i64) -> bool {
        self.open(FormMode::Edit(id))
    }

    fn open(&mut self, mode: FormMode) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = FormPhase::Open(mode);
        self.error = None;
        true
    }

    /// Returns the mode being submitted, or None if the form is not open
    pub fn begin_submit(&mut self) -> Option<FormMode> {
        match self.phase {
            FormPhase::Open(mode) => {
                self.phase = FormPhase::Submitting(mode);
                self.error = None;
                Some(mode)
            }
            _ => None,
        }
    }

    pub fn submit_failed(&mut self, error: impl Into<String>) {
        if let FormPhase::Submitting(mode) = self.phase {
            self.phase = FormPhase::Open(mode);
        }
        self.error = Some(error.into());
    }

    pub fn submit_succeeded(&mut self) {
        self.phase = FormPhase::Closed;
        self.error = None;
    }

    /// Закрытие во время отправки запрещено
    pub fn close(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = FormPhase::Closed;
        self.error = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_submit_closes() {
        let mut form = ModalForm::default();
        assert!(form.open_create());
        assert_eq!(form.begin_submit(), Some(FormMode::Create));
        assert!(form.is_submitting());
        form.submit_succeeded();
        assert_eq!(form.phase(), FormPhase::Closed);
    }

    #[test]
    fn test_failed_submit_keeps_form_open_with_error() {
        let mut form = ModalForm::default();
        form.open_edit(4);
        form.begin_submit();
        form.submit_failed("Запись не найдена");
        assert_eq!(form.phase(), FormPhase::Open(FormMode::Edit(4)));
        assert_eq!(form.error(), Some("Запись не найдена"));
        assert!(form.begin_submit().is_some());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_cannot_close_or_reopen_while_submitting() {
        let mut form = ModalForm::default();
        form.open_create();
        form.begin_submit();
        assert!(!form.close());
        assert!(!form.open_edit(1));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_submit_requires_open_form() {
        let mut form = ModalForm::default();
        assert_eq!(form.begin_submit(), None);
    }
}
