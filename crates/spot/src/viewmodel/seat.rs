use crate::client::SpotClient;
use crate::error::{SpotError, SpotResult};
use crate::models::{Schedule, Seat, Section};
use crate::notifications::{record_activity, SharedLog};
use crate::seat_grid::{SeatCoord, SeatGrid, SeatSelection};
use crate::state::{LoadState, StateCell};
use crate::timetable::format_schedule_text;
use futures::join;
use tracing::{debug, info};

const NOT_ENROLLED: &str =
    "You are not enrolled in this section. Please enroll before viewing the seat plan.";

/// Student seat plan: the section's seats, the student's own seat, a local
/// selection and the state of the pick request.
pub struct SeatPlanViewModel {
    client: SpotClient,
    activity: Option<SharedLog>,
    section: Option<Section>,
    schedules: StateCell<Vec<Schedule>>,
    seats: StateCell<Vec<Seat>>,
    my_seat: Option<Seat>,
    pick: StateCell<Seat>,
    selection: SeatSelection,
}

impl SeatPlanViewModel {
    pub fn new(client: SpotClient) -> Self {
        Self {
            client,
            activity: None,
            section: None,
            schedules: StateCell::new(),
            seats: StateCell::new(),
            my_seat: None,
            pick: StateCell::new(),
            selection: SeatSelection::default(),
        }
    }

    /// Successful picks are recorded in `log`.
    pub fn with_activity_log(mut self, log: SharedLog) -> Self {
        self.activity = Some(log);
        self
    }

    pub fn section(&self) -> Option<&Section> {
        self.section.as_ref()
    }

    pub fn seats(&self) -> &StateCell<Vec<Seat>> {
        &self.seats
    }

    pub fn pick_state(&self) -> &StateCell<Seat> {
        &self.pick
    }

    pub fn my_seat(&self) -> Option<&Seat> {
        self.my_seat.as_ref()
    }

    pub fn selected(&self) -> Option<SeatCoord> {
        self.selection.selected()
    }

    /// Formatted class times, falling back to the course's schedule text
    /// while the section's schedules are missing.
    pub fn schedule_text(&self) -> String {
        if let LoadState::Success(schedules) = self.schedules.get() {
            if let Some(text) = format_schedule_text(&schedules) {
                return text;
            }
        }
        self.section
            .as_ref()
            .map(|s| s.schedule_text().to_string())
            .unwrap_or_default()
    }

    /// Grid of the loaded seats, empty while nothing is loaded.
    pub fn grid(&self) -> SeatGrid {
        let seats = match self.seats.get() {
            LoadState::Success(seats) => seats,
            _ => Vec::new(),
        };
        SeatGrid::mobile(&seats, self.client.session().user_id())
    }

    /// Switches to `section` and loads its schedules and seats.
    pub async fn open(&mut self, section: Section) -> LoadState<Vec<Seat>> {
        debug!(section_id = section.id, "Opening seat plan");
        let section_id = section.id;
        self.section = Some(section);
        self.my_seat = None;
        self.selection.clear();
        self.pick.reset();

        let schedules = self.client.schedules();
        let (_, seats) = join!(
            self.schedules.run(schedules.list_by_section(section_id)),
            self.seats.run(self.enrolled_seats(section_id))
        );
        if seats.data().is_some() {
            self.load_my_seat(section_id).await;
        }
        seats
    }

    /// Seats of a section the student is enrolled in. Backend failures are
    /// reported as such, not as a missing enrollment.
    async fn enrolled_seats(&self, section_id: i64) -> SpotResult<Vec<Seat>> {
        let student_id = self.client.require_user_id()?;
        let enrollments = self.client.enrollments().fetch_by_student(student_id).await?;
        if !enrollments.iter().any(|e| e.section.id == section_id) {
            return Err(SpotError::validation(NOT_ENROLLED));
        }
        self.client.seats().fetch_by_section(section_id).await
    }

    /// Looks up the student's own seat and preselects it.
    async fn load_my_seat(&mut self, section_id: i64) {
        let Ok(student_id) = self.client.require_user_id() else {
            return;
        };
        self.my_seat = match self.client.seats().get_for_student(student_id, section_id).await {
            Ok(seat) => seat,
            Err(e) => {
                debug!(error = %e, "No seat for student");
                None
            }
        };
        self.clear_selection();
    }

    /// Selects a free cell or the student's own. Returns false otherwise.
    pub fn select(&mut self, row: u32, column: u32) -> bool {
        let grid = self.grid();
        self.selection.select(&grid, row, column)
    }

    /// Back to the student's current seat, or to nothing.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        if let Some(seat) = &self.my_seat {
            let (row, column) = (seat.row, seat.column);
            let grid = self.grid();
            self.selection.select(&grid, row, column);
        }
    }

    /// Submits the selected seat. On success the seat becomes the
    /// student's, the pick is logged and the plan reloaded.
    pub async fn submit(&mut self) -> LoadState<Seat> {
        let section = self.section.clone();
        let selected = self.selection.selected();
        let state = self
            .pick
            .run(async {
                let section = section.as_ref().ok_or_else(|| SpotError::validation("No section selected"))?;
                let coord = selected.ok_or_else(|| SpotError::validation("Please select a seat first"))?;
                self.client
                    .seats()
                    .pick(section.id, coord.row, coord.column)
                    .await
            })
            .await;

        if let (LoadState::Success(seat), Some(section)) = (&state, section) {
            info!(section_id = section.id, row = seat.row, column = seat.column, "Seat picked");
            record_activity(self.activity.as_ref(), |log| {
                log.log_seat_selection(&section.section_name, seat.row + 1, seat.column + 1, section.id)
            });
            self.my_seat = Some(seat.clone());
            self.seats.run(self.enrolled_seats(section.id)).await;
            self.clear_selection();
        }
        state
    }

    /// Forgets the section and every state.
    pub fn reset(&mut self) {
        self.section = None;
        self.my_seat = None;
        self.selection.clear();
        self.schedules.reset();
        self.seats.reset();
        self.pick.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn seat(row: u32, column: u32, student_id: i64) -> Seat {
        Seat {
            id: row as i64 * 10 + column as i64,
            section_id: 1,
            student: None,
            student_id: Some(student_id),
            row,
            column,
        }
    }

    fn view_model() -> SeatPlanViewModel {
        SeatPlanViewModel::new(SpotClient::new(&ClientConfig::default()).unwrap())
    }

    #[test]
    fn test_selection_skips_taken_seats() {
        let mut vm = view_model();
        vm.seats().set_success(vec![seat(0, 0, 7)]);

        assert!(!vm.select(0, 0));
        assert!(vm.select(1, 2));
        assert_eq!(vm.selected(), Some(SeatCoord { row: 1, column: 2 }));
        assert!(!vm.select(9, 9));

        vm.clear_selection();
        assert_eq!(vm.selected(), None);
    }

    #[tokio::test]
    async fn test_submit_without_selection() {
        let mut vm = view_model();
        let state = vm.submit().await;
        assert_eq!(state, LoadState::Error("No section selected".to_string()));
    }
}
