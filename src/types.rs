/// Repository slug in `<owner>/<name>` form (unique key of the dataset).
/// Example: `OHDSI/Achilles`
pub type RepoSlug = String;
/// Owner identifier taken from the slug prefix before the first `/`.
/// Examples: `OHDSI`, `google`, `jmcvey3`
pub type OrgName = String;
/// Free-form category label from the catalog taxonomy.
/// Examples: `Imaging`, `NLP`, `Data Standards`
pub type CategoryName = String;
/// Free-form subcategory label nested under a category.
/// Examples: `Segmentation`, `Terminology Mapping`
pub type SubcategoryName = String;
/// Primary programming language reported for a repository.
/// Examples: `Python`, `R`, `Java`
pub type LanguageName = String;
/// Named interoperability/data standard a repository implements.
/// Examples: `FHIR`, `OMOP`, `DICOM`
pub type StandardName = String;
/// Contributor account handle as listed in the catalog.
/// Examples: `alice`, `dependabot[bot]`
pub type ContributorHandle = String;
