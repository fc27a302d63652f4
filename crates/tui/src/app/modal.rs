use api_types::{
    command::{Action, MutationCommand},
    item::Item,
};

const DEFAULT_REQUESTOR: &str = "System";
const DEFAULT_PROJECT: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Create,
    CheckOut,
    CheckIn,
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    CheckOut,
    CheckIn,
}

impl Adjustment {
    /// Applies the direction to an entered quantity, whatever its sign.
    pub fn signed(self, qty: i64) -> i64 {
        match self {
            Self::CheckOut => -qty.saturating_abs(),
            Self::CheckIn => qty.saturating_abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Barcode,
    ItemName,
    Unit,
    Location,
    Qty,
    MinQty,
    Requestor,
    Site,
    Remark,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Barcode => "Barcode",
            Self::ItemName => "Item name",
            Self::Unit => "Unit",
            Self::Location => "Location",
            Self::Qty => "Quantity",
            Self::MinQty => "Min qty",
            Self::Requestor => "Requestor",
            Self::Site => "Project / site",
            Self::Remark => "Remark",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Qty | Self::MinQty)
    }
}

const CREATE_FIELDS: &[Field] = &[
    Field::Barcode,
    Field::ItemName,
    Field::Unit,
    Field::Location,
    Field::Qty,
    Field::MinQty,
];
const ADJUST_FIELDS: &[Field] = &[Field::Qty, Field::Requestor, Field::Site, Field::Remark];
const EDIT_FIELDS: &[Field] = &[Field::ItemName, Field::Unit, Field::Location, Field::MinQty];

const CREATE_REQUIRED: &[Field] = &[
    Field::Barcode,
    Field::ItemName,
    Field::Unit,
    Field::Qty,
    Field::MinQty,
];
const ADJUST_REQUIRED: &[Field] = &[Field::Qty, Field::Requestor, Field::Site];
const EDIT_REQUIRED: &[Field] = &[Field::ItemName];

/// Text buffers behind the active form. Numbers stay as typed until the
/// command is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub barcode: String,
    pub item_name: String,
    pub unit: String,
    pub location: String,
    pub qty: String,
    pub min_qty: String,
    pub requestor: String,
    pub site: String,
    pub remark: String,
}

impl FormDraft {
    /// Draft for registering a new item.
    pub fn blank() -> Self {
        Self {
            qty: "0".to_string(),
            min_qty: "1".to_string(),
            ..Self::default()
        }
    }

    fn for_edit(item: &Item) -> Self {
        Self {
            barcode: item.barcode.clone(),
            item_name: item.item_name.clone(),
            unit: item.unit.clone(),
            location: item.location.clone().unwrap_or_default(),
            min_qty: item.min_qty.to_string(),
            ..Self::default()
        }
    }

    fn for_adjustment(item: &Item) -> Self {
        Self {
            barcode: item.barcode.clone(),
            item_name: item.item_name.clone(),
            qty: "1".to_string(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Barcode => &self.barcode,
            Field::ItemName => &self.item_name,
            Field::Unit => &self.unit,
            Field::Location => &self.location,
            Field::Qty => &self.qty,
            Field::MinQty => &self.min_qty,
            Field::Requestor => &self.requestor,
            Field::Site => &self.site,
            Field::Remark => &self.remark,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Barcode => &mut self.barcode,
            Field::ItemName => &mut self.item_name,
            Field::Unit => &mut self.unit,
            Field::Location => &mut self.location,
            Field::Qty => &mut self.qty,
            Field::MinQty => &mut self.min_qty,
            Field::Requestor => &mut self.requestor,
            Field::Site => &mut self.site,
            Field::Remark => &mut self.remark,
        }
    }
}

/// The one modal that may be on screen.
///
/// Each variant carries exactly what its form needs, so a delete can never
/// hold leftover check-out values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Creating {
        draft: FormDraft,
    },
    Adjusting {
        adjustment: Adjustment,
        item: Item,
        draft: FormDraft,
    },
    Editing {
        item: Item,
        draft: FormDraft,
    },
    Deleting {
        item: Item,
    },
}

impl ModalState {
    pub fn kind(&self) -> Option<ModalKind> {
        match self {
            Self::Closed => None,
            Self::Creating { .. } => Some(ModalKind::Create),
            Self::Adjusting {
                adjustment: Adjustment::CheckOut,
                ..
            } => Some(ModalKind::CheckOut),
            Self::Adjusting {
                adjustment: Adjustment::CheckIn,
                ..
            } => Some(ModalKind::CheckIn),
            Self::Editing { .. } => Some(ModalKind::Edit),
            Self::Deleting { .. } => Some(ModalKind::Delete),
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Creating { .. } => CREATE_FIELDS,
            Self::Adjusting { .. } => ADJUST_FIELDS,
            Self::Editing { .. } => EDIT_FIELDS,
            Self::Closed | Self::Deleting { .. } => &[],
        }
    }

    pub fn required(&self) -> &'static [Field] {
        match self {
            Self::Creating { .. } => CREATE_REQUIRED,
            Self::Adjusting { .. } => ADJUST_REQUIRED,
            Self::Editing { .. } => EDIT_REQUIRED,
            Self::Closed | Self::Deleting { .. } => &[],
        }
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        match self {
            Self::Creating { draft }
            | Self::Adjusting { draft, .. }
            | Self::Editing { draft, .. } => Some(draft),
            Self::Closed | Self::Deleting { .. } => None,
        }
    }

    fn draft_mut(&mut self) -> Option<&mut FormDraft> {
        match self {
            Self::Creating { draft }
            | Self::Adjusting { draft, .. }
            | Self::Editing { draft, .. } => Some(draft),
            Self::Closed | Self::Deleting { .. } => None,
        }
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Adjusting { item, .. } | Self::Editing { item, .. } | Self::Deleting { item } => {
                Some(item)
            }
            Self::Closed | Self::Creating { .. } => None,
        }
    }
}

/// Which side wins when both the draft and the selected item carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// A non-empty draft value wins, the item fills the gaps.
    DraftFirst,
    /// The item value wins. Used for the barcode, which never changes.
    ItemFirst,
}

/// First non-empty value in precedence order. Whitespace counts as a value:
/// only a field left empty falls through.
pub fn coalesce(precedence: Precedence, draft: &str, item: Option<&str>) -> Option<String> {
    let draft = Some(draft).filter(|value| !value.is_empty());
    let item = item.filter(|value| !value.is_empty());
    let value = match precedence {
        Precedence::DraftFirst => draft.or(item),
        Precedence::ItemFirst => item.or(draft),
    };
    value.map(str::to_string)
}

/// Parses a typed quantity; anything that is not a number counts as zero.
pub fn parse_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|value| value.trunc() as i64))
        .unwrap_or(0)
}

/// Builds the write for the current modal. Performs no validation: the form
/// checks required fields before it gets here.
pub fn build_command(state: &ModalState) -> Option<MutationCommand> {
    let action = match state.kind()? {
        ModalKind::Create => Action::AddNew,
        ModalKind::CheckOut => Action::Out,
        ModalKind::CheckIn => Action::In,
        ModalKind::Edit => Action::Edit,
        ModalKind::Delete => Action::Delete,
    };

    let empty = FormDraft::default();
    let draft = state.draft().unwrap_or(&empty);
    let item = state.item();

    let entered = parse_quantity(&draft.qty);
    let qty = match state {
        ModalState::Adjusting { adjustment, .. } => adjustment.signed(entered),
        _ => entered,
    };

    Some(MutationCommand {
        action,
        barcode: coalesce(
            Precedence::ItemFirst,
            &draft.barcode,
            item.map(|item| item.barcode.as_str()),
        )
        .unwrap_or_default(),
        item_name: coalesce(
            Precedence::DraftFirst,
            &draft.item_name,
            item.map(|item| item.item_name.as_str()),
        ),
        unit: coalesce(
            Precedence::DraftFirst,
            &draft.unit,
            item.map(|item| item.unit.as_str()),
        ),
        location: coalesce(
            Precedence::DraftFirst,
            &draft.location,
            item.and_then(|item| item.location.as_deref()),
        ),
        qty,
        min_qty: parse_quantity(&draft.min_qty),
        requestor: coalesce(Precedence::DraftFirst, &draft.requestor, Some(DEFAULT_REQUESTOR))
            .unwrap_or_default(),
        project: coalesce(Precedence::DraftFirst, &draft.site, Some(DEFAULT_PROJECT))
            .unwrap_or_default(),
        remark: draft.remark.clone(),
    })
}

/// Modal state plus the input surface around it: focus, inline errors and
/// the in-flight marker.
#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    focus: usize,
    error: Option<String>,
    submitting: bool,
}

impl ModalController {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Opens `kind` with a fresh draft. Every kind but `Create` needs an
    /// item; without one nothing opens and `false` is returned.
    pub fn open(&mut self, kind: ModalKind, item: Option<&Item>) -> bool {
        let state = match (kind, item) {
            (ModalKind::Create, _) => ModalState::Creating {
                draft: FormDraft::blank(),
            },
            (ModalKind::CheckOut, Some(item)) => ModalState::Adjusting {
                adjustment: Adjustment::CheckOut,
                item: item.clone(),
                draft: FormDraft::for_adjustment(item),
            },
            (ModalKind::CheckIn, Some(item)) => ModalState::Adjusting {
                adjustment: Adjustment::CheckIn,
                item: item.clone(),
                draft: FormDraft::for_adjustment(item),
            },
            (ModalKind::Edit, Some(item)) => ModalState::Editing {
                item: item.clone(),
                draft: FormDraft::for_edit(item),
            },
            (ModalKind::Delete, Some(item)) => ModalState::Deleting { item: item.clone() },
            (_, None) => return false,
        };

        self.state = state;
        self.focus = 0;
        self.error = None;
        self.submitting = false;
        true
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.state.fields().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let len = self.state.fields().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.state.fields().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    pub fn input(&mut self, ch: char) {
        if self.submitting {
            return;
        }
        let Some(field) = self.focused_field() else {
            return;
        };
        // Only the initial stock of a new item may be negative.
        let signed = field == Field::Qty && matches!(self.state, ModalState::Creating { .. });
        if field.is_numeric() && !ch.is_ascii_digit() && !(signed && ch == '-') {
            return;
        }
        let Some(draft) = self.state.draft_mut() else {
            return;
        };

        let value = draft.field_mut(field);
        if ch == '-' && field.is_numeric() && !(value.is_empty() || value == "0") {
            return;
        }
        if field.is_numeric() && value == "0" {
            value.clear();
        }
        value.push(ch);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        let Some(field) = self.focused_field() else {
            return;
        };
        if let Some(draft) = self.state.draft_mut() {
            draft.field_mut(field).pop();
        }
    }

    /// Required fields still empty in the draft.
    pub fn missing_required(&self) -> Vec<Field> {
        let Some(draft) = self.state.draft() else {
            return Vec::new();
        };
        self.state
            .required()
            .iter()
            .copied()
            .filter(|field| {
                let value = draft.field(*field);
                value.is_empty() || (field.is_numeric() && value == "-")
            })
            .collect()
    }

    /// Shows an inline error and moves focus to the first missing field.
    pub fn reject(&mut self, missing: &[Field]) {
        let Some(first) = missing.first() else {
            return;
        };
        if let Some(index) = self.state.fields().iter().position(|field| field == first) {
            self.focus = index;
        }
        let names = missing
            .iter()
            .map(|field| field.label())
            .collect::<Vec<_>>()
            .join(", ");
        self.error = Some(format!("Required: {names}"));
    }

    /// Builds the command and marks the modal as in flight. Returns `None`
    /// when closed or when a previous submit has not settled yet.
    pub fn submit(&mut self) -> Option<MutationCommand> {
        if self.submitting {
            return None;
        }
        let command = build_command(&self.state)?;
        self.submitting = true;
        self.error = None;
        Some(command)
    }

    /// The write never left this process; keep the draft for another try.
    pub fn write_failed(&mut self) {
        self.submitting = false;
    }
}
