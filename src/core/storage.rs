//! JSON persistence of groups, questions and user preferences.
//!
//! The on-disk document is made of plain `Json*` records holding strings and
//! numbers. Loading runs every value through its validator and rebuilds the
//! aggregate, so a hand-edited file that breaks an invariant is rejected as a
//! whole rather than partially loaded.

use crate::core::error::StorageError;
use crate::core::unique_list::UniqueList;
use crate::model::group::Group;
use crate::model::lesson::Lesson;
use crate::model::manager::Model;
use crate::model::question::Question;
use crate::model::serenity::Serenity;
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::user_prefs::UserPrefs;
use crate::model::values::{Attendance, Participation};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonStudent {
    pub name: String,
    pub student_number: String,
}

impl JsonStudent {
    fn from_model(student: &Student) -> Self {
        Self {
            name: student.name().to_string(),
            student_number: student.number().to_string(),
        }
    }

    fn to_model(&self) -> StorageResult<Student> {
        Ok(Student::new(self.name.parse()?, self.student_number.parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonParticipation {
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonStudentInfo {
    pub student: JsonStudent,
    pub attendance: Attendance,
    pub participation: JsonParticipation,
}

impl JsonStudentInfo {
    fn from_model(info: &StudentInfo) -> Self {
        Self {
            student: JsonStudent::from_model(info.student()),
            attendance: info.attendance(),
            participation: JsonParticipation {
                score: i64::from(info.participation().score()),
            },
        }
    }

    fn to_model(&self) -> StorageResult<StudentInfo> {
        Ok(StudentInfo::new(
            self.student.to_model()?,
            self.attendance,
            Participation::new(self.participation.score)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLesson {
    pub name: String,
    pub student_infos: Vec<JsonStudentInfo>,
}

impl JsonLesson {
    fn from_model(lesson: &Lesson) -> Self {
        Self {
            name: lesson.name().to_string(),
            student_infos: lesson
                .student_infos()
                .iter()
                .map(JsonStudentInfo::from_model)
                .collect(),
        }
    }

    fn to_model(&self) -> StorageResult<Lesson> {
        let infos = self
            .student_infos
            .iter()
            .map(JsonStudentInfo::to_model)
            .collect::<StorageResult<Vec<_>>>()?;
        Ok(Lesson::new(self.name.parse()?, infos)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonGroup {
    pub name: String,
    pub students: Vec<JsonStudent>,
    pub lessons: Vec<JsonLesson>,
}

impl JsonGroup {
    fn from_model(group: &Group) -> Self {
        Self {
            name: group.name().to_string(),
            students: group.students().iter().map(JsonStudent::from_model).collect(),
            lessons: group.lessons().iter().map(JsonLesson::from_model).collect(),
        }
    }

    fn to_model(&self) -> StorageResult<Group> {
        let students = self
            .students
            .iter()
            .map(JsonStudent::to_model)
            .collect::<StorageResult<Vec<_>>>()?;
        let lessons = self
            .lessons
            .iter()
            .map(JsonLesson::to_model)
            .collect::<StorageResult<Vec<_>>>()?;
        Ok(Group::new(self.name.parse()?, students, lessons)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonQuestion {
    pub group: String,
    pub lesson: String,
    pub text: String,
}

impl JsonQuestion {
    fn from_model(question: &Question) -> Self {
        Self {
            group: question.group.to_string(),
            lesson: question.lesson.to_string(),
            text: question.text.to_string(),
        }
    }

    fn to_model(&self) -> StorageResult<Question> {
        Ok(Question::new(
            self.group.parse()?,
            self.lesson.parse()?,
            self.text.parse()?,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSerenity {
    pub groups: Vec<JsonGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonQuestionManager {
    pub questions: Vec<JsonQuestion>,
}

/// The whole data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonDocument {
    pub serenity: JsonSerenity,
    pub question_manager: JsonQuestionManager,
    pub user_prefs: UserPrefs,
}

/// Validated content of a data file
#[derive(Debug, Clone, PartialEq)]
pub struct StoredData {
    pub serenity: Serenity,
    pub questions: UniqueList<Question>,
    pub user_prefs: UserPrefs,
}

impl JsonDocument {
    pub fn from_model(model: &Model) -> Self {
        Self {
            serenity: JsonSerenity {
                groups: model.serenity().groups().iter().map(JsonGroup::from_model).collect(),
            },
            question_manager: JsonQuestionManager {
                questions: model.questions().iter().map(JsonQuestion::from_model).collect(),
            },
            user_prefs: model.user_prefs().clone(),
        }
    }

    pub fn into_data(self) -> StorageResult<StoredData> {
        let groups = self
            .serenity
            .groups
            .iter()
            .map(JsonGroup::to_model)
            .collect::<StorageResult<Vec<_>>>()?;
        let questions = self
            .question_manager
            .questions
            .iter()
            .map(JsonQuestion::to_model)
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(StoredData {
            serenity: Serenity::from_groups(groups)?,
            questions: UniqueList::from_vec(questions)?,
            user_prefs: self.user_prefs,
        })
    }
}

/// Reads and writes the data file at a fixed path
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the data file; `Ok(None)` when it does not exist yet
    pub fn load(&self) -> StorageResult<Option<StoredData>> {
        if !self.path.exists() {
            debug!("No data file at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        let document: JsonDocument =
            serde_json::from_str(&content).map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        let data = document.into_data()?;

        info!(
            "Loaded {} groups and {} questions from {}",
            data.serenity.groups().len(),
            data.questions.len(),
            self.path.display()
        );
        Ok(Some(data))
    }

    /// Write the model through a temporary file renamed over the target
    pub fn save(&self, model: &Model) -> StorageResult<()> {
        let document = JsonDocument::from_model(model);
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::Serialize { source: e })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path).map_err(|e| StorageError::Write {
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| StorageError::Write {
                path: temp_path.clone(),
                source: e,
            })?;

        fs::rename(&temp_path, &self.path).map_err(|e| StorageError::AtomicRenameFailed {
            temp_path: temp_path.clone(),
            target_path: self.path.clone(),
            source: e,
        })?;

        debug!("Saved data to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
